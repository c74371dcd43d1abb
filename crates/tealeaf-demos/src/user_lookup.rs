//! Look up a user profile over HTTP.
//!
//! The component never performs I/O itself.  Submitting a login returns an
//! [`Effect::FetchUser`] tagged with [`SOURCE`] and a fresh generation id;
//! the runtime runs the request and delivers an [`Event::Fetched`] carrying
//! the same pair.  Only the completion for the newest request is applied, and
//! only while the component is still waiting for it, so a slow reply to an
//! abandoned search can never overwrite a newer one.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};
use tealeaf_core::{
    is_interrupt, Component, Effect, Event, FetchCompleted, FetchError, Theme, UserProfile,
};
use tealeaf_widgets::spinner::Spinner;
use tealeaf_widgets::text_field::TextField;
use tracing::{debug, info};

/// Source tag attached to this component's fetches.
pub const SOURCE: &str = "user_lookup";

/// Maximum number of retries after the first failed attempt.
pub const MAX_RETRIES: u32 = 3;

/// Longest login the input accepts.
pub const LOGIN_LIMIT: usize = 39;

const INPUT_ID: &str = "user_lookup.input";
const SPINNER_ID: &str = "user_lookup.spinner";
const LABEL_WIDTH: usize = 12;

/// Where the lookup is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    /// Waiting for a login to be typed.
    Input,
    /// A request is in flight.
    Loading,
    Success(UserProfile),
    Error(FetchError),
}

/// A search box that fetches and displays one user profile.
#[derive(Debug, Clone)]
pub struct UserLookup {
    input: TextField,
    spinner: Spinner,
    state: LookupState,
    login: String,
    retries: u32,
    generation: u64,
}

impl Default for UserLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl UserLookup {
    pub fn new() -> Self {
        let input = TextField::new(INPUT_ID)
            .with_placeholder("e.g. octocat")
            .with_char_limit(LOGIN_LIMIT)
            .with_width(30);
        Self {
            input,
            spinner: Spinner::new(SPINNER_ID),
            state: LookupState::Input,
            login: String::new(),
            retries: 0,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// The login of the most recent request.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Retries made for the current login.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Id of the newest request; completions carrying any other id are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current text of the search box.
    pub fn input(&self) -> String {
        self.input.value()
    }

    fn request(&mut self) -> Effect {
        self.generation += 1;
        self.state = LookupState::Loading;
        self.input.blur();
        info!(login = %self.login, retry = self.retries, id = self.generation, "Looking up user");
        Effect::batch([
            self.spinner.start(),
            Effect::fetch_user(SOURCE, self.generation, self.login.clone()),
        ])
    }

    fn back_to_input(&mut self) -> Effect {
        self.state = LookupState::Input;
        self.input.reset();
        self.input.focus()
    }

    fn on_fetched(&mut self, done: &FetchCompleted) {
        if done.source != SOURCE {
            return;
        }
        if done.request_id != self.generation || self.state != LookupState::Loading {
            debug!(
                id = done.request_id,
                current = self.generation,
                "Ignoring stale lookup result"
            );
            return;
        }
        self.state = match &done.result {
            Ok(profile) => LookupState::Success(profile.clone()),
            Err(err) => {
                debug!(%err, login = %self.login, "Lookup failed");
                LookupState::Error(err.clone())
            }
        };
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Effect {
        match self.state {
            LookupState::Input => match key.code {
                KeyCode::Enter => {
                    let login = self.input.value().trim().to_string();
                    if login.is_empty() {
                        return Effect::none();
                    }
                    self.login = login;
                    self.retries = 0;
                    self.request()
                }
                KeyCode::Esc => Effect::quit(),
                _ if is_interrupt(key) => Effect::quit(),
                _ => {
                    self.input.handle_key(key);
                    Effect::none()
                }
            },
            LookupState::Loading => Effect::none(),
            LookupState::Error(_) => match key.code {
                KeyCode::Enter if self.retries < MAX_RETRIES => {
                    self.retries += 1;
                    self.request()
                }
                KeyCode::Esc => self.back_to_input(),
                _ if is_interrupt(key) => Effect::quit(),
                _ => Effect::none(),
            },
            LookupState::Success(_) => match key.code {
                KeyCode::Enter => self.back_to_input(),
                KeyCode::Esc => Effect::quit(),
                _ if is_interrupt(key) => Effect::quit(),
                _ => Effect::none(),
            },
        }
    }

    fn profile_lines(profile: &UserProfile, theme: &Theme) -> Vec<Line<'static>> {
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), theme.label),
                Span::styled(value, theme.value),
            ])
        };

        let mut lines = vec![row("Login:", profile.login.clone())];
        for (label, value) in [
            ("Name:", &profile.name),
            ("Company:", &profile.company),
            ("Location:", &profile.location),
            ("Bio:", &profile.bio),
        ] {
            if !value.is_empty() {
                lines.push(row(label, value.clone()));
            }
        }
        lines.push(row("Repos:", profile.public_repos.to_string()));
        lines.push(row("Followers:", profile.followers.to_string()));
        lines.push(row("Following:", profile.following.to_string()));
        lines.push(row("Joined:", profile.created_at.format("%Y-%m-%d").to_string()));
        if !profile.html_url.is_empty() {
            lines.push(row("URL:", profile.html_url.clone()));
        }
        lines
    }
}

impl Component for UserLookup {
    fn init(&mut self) -> Effect {
        self.input.focus()
    }

    fn update(&mut self, event: &Event) -> Effect {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) if self.state == LookupState::Input => {
                self.input.insert_paste(text);
                Effect::none()
            }
            Event::Fetched(done) => {
                self.on_fetched(done);
                Effect::none()
            }
            Event::Tick { .. } => {
                let loading = self.state == LookupState::Loading;
                Effect::batch([self.spinner.update(event, loading), self.input.update(event)])
            }
            _ => Effect::none(),
        }
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        let mut lines = Vec::new();
        match &self.state {
            LookupState::Input => {
                lines.push(Line::styled("GitHub User Search", theme.title));
                lines.push(Line::default());
                lines.push(Line::raw("Enter a username:"));
                lines.push(self.input.view(theme));
                lines.push(Line::default());
                lines.push(Line::styled("Enter: search  Esc: quit", theme.help));
            }
            LookupState::Loading => {
                lines.push(Line::styled("GitHub User Search", theme.title));
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    self.spinner.view(theme.accent),
                    Span::raw(format!(" searching '{}'...", self.login)),
                ]));
                if self.retries > 0 {
                    lines.push(Line::default());
                    lines.push(Line::styled(
                        format!("retry {}/{}", self.retries, MAX_RETRIES),
                        theme.warning,
                    ));
                }
            }
            LookupState::Error(err) => {
                lines.push(Line::styled("GitHub User Search", theme.title));
                lines.push(Line::default());
                lines.push(Line::styled("Something went wrong", theme.error));
                lines.push(Line::default());
                lines.push(Line::raw(err.to_string()));
                lines.push(Line::default());
                if self.retries < MAX_RETRIES {
                    lines.push(Line::styled(
                        "Enter: retry  Esc: back  Ctrl+C: quit",
                        theme.help,
                    ));
                } else {
                    lines.push(Line::styled(
                        format!("retry limit ({}) reached", MAX_RETRIES),
                        theme.error,
                    ));
                    lines.push(Line::styled("Esc: back  Ctrl+C: quit", theme.help));
                }
            }
            LookupState::Success(profile) => {
                lines.push(Line::styled("GitHub User", theme.title));
                lines.push(Line::default());
                lines.push(Line::styled("User found!", theme.success));
                lines.push(Line::default());
                lines.extend(Self::profile_lines(profile, theme));
                lines.push(Line::default());
                lines.push(Line::styled("Enter: new search  Esc: quit", theme.help));
            }
        }
        Text::from(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tealeaf_core::testing::TestProgram;

    fn profile(login: &str) -> UserProfile {
        let created = Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap();
        UserProfile {
            login: login.to_string(),
            name: "The Octocat".into(),
            company: String::new(),
            blog: String::new(),
            location: "San Francisco".into(),
            email: String::new(),
            bio: String::new(),
            public_repos: 8,
            public_gists: 8,
            followers: 20,
            following: 9,
            created_at: created,
            updated_at: created,
            avatar_url: String::new(),
            html_url: format!("https://github.com/{login}"),
        }
    }

    fn searching(login: &str) -> TestProgram<UserLookup> {
        let mut prog = TestProgram::new(UserLookup::new());
        prog.send(Event::Paste(login.into()));
        prog.send(Event::key(KeyCode::Enter));
        prog
    }

    fn failed(prog: &mut TestProgram<UserLookup>) {
        prog.resolve_fetches(|_| Err(FetchError::Status(500)));
    }

    #[test]
    fn init_blinks_cursor() {
        let prog = TestProgram::new(UserLookup::new());
        assert_eq!(prog.pending_ticks(), vec![INPUT_ID]);
        assert_eq!(prog.view_lines()[3], "e.g. octocat");
    }

    #[test]
    fn empty_submit_stays_in_input() {
        let mut prog = TestProgram::new(UserLookup::new());
        assert!(prog.send(Event::key(KeyCode::Enter)).is_none());
        prog.send_all([Event::char(' '), Event::char(' ')]);
        assert!(prog.send(Event::key(KeyCode::Enter)).is_none());
        assert_eq!(prog.component().state(), &LookupState::Input);
        assert!(prog.pending_fetches().is_empty());
    }

    #[test]
    fn submit_starts_spinner_and_fetch() {
        let mut prog = TestProgram::new(UserLookup::new());
        prog.send_all(" octocat ".chars().map(Event::char));
        let effect = prog.send(Event::key(KeyCode::Enter)).clone();

        assert_eq!(effect.ticks(), vec![SPINNER_ID]);
        let fetches = effect.fetches();
        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].source, SOURCE);
        assert_eq!(fetches[0].login, "octocat");
        assert_eq!(prog.component().state(), &LookupState::Loading);
    }

    #[test]
    fn success_shows_profile() {
        let mut prog = searching("octocat");
        prog.resolve_fetches(|req| Ok(profile(&req.login)));
        assert_eq!(
            prog.component().state(),
            &LookupState::Success(profile("octocat"))
        );

        let lines = prog.view_lines();
        assert!(lines.contains(&"Login:      octocat".to_string()));
        assert!(lines.contains(&"Joined:     2011-01-25".to_string()));
        // Empty fields are left out.
        assert!(!lines.iter().any(|l| l.starts_with("Company:")));
    }

    #[test]
    fn error_then_retry_reuses_login() {
        let mut prog = searching("ghost");
        prog.resolve_fetches(|req| Err(FetchError::NotFound(req.login.clone())));
        assert!(prog
            .view_lines()
            .contains(&"user 'ghost' not found".to_string()));

        let effect = prog.send(Event::key(KeyCode::Enter)).clone();
        assert_eq!(effect.fetches()[0].login, "ghost");
        assert_eq!(prog.component().retries(), 1);
        assert!(prog.view_lines().contains(&"retry 1/3".to_string()));
    }

    #[test]
    fn retry_limit_stops_requests() {
        let mut prog = searching("flaky");
        failed(&mut prog);
        for _ in 0..MAX_RETRIES {
            prog.send(Event::key(KeyCode::Enter));
            failed(&mut prog);
        }
        assert_eq!(prog.component().retries(), MAX_RETRIES);
        assert!(prog.send(Event::key(KeyCode::Enter)).is_none());
        assert!(matches!(prog.component().state(), LookupState::Error(_)));
        assert!(prog
            .view_lines()
            .contains(&"retry limit (3) reached".to_string()));
    }

    #[test]
    fn esc_from_error_returns_to_empty_input() {
        let mut prog = searching("ghost");
        failed(&mut prog);
        prog.send(Event::key(KeyCode::Esc));
        assert_eq!(prog.component().state(), &LookupState::Input);
        assert_eq!(prog.component().input(), "");
        assert!(prog.pending_ticks().contains(&INPUT_ID));
    }

    #[test]
    fn enter_after_success_starts_over() {
        let mut prog = searching("octocat");
        prog.resolve_fetches(|req| Ok(profile(&req.login)));
        assert!(!prog.send(Event::key(KeyCode::Enter)).is_quit());
        assert_eq!(prog.component().state(), &LookupState::Input);
        assert_eq!(prog.component().input(), "");
    }

    #[test]
    fn quit_keys_per_state() {
        let mut prog = TestProgram::new(UserLookup::new());
        assert!(prog.send(Event::key(KeyCode::Esc)).is_quit());
        assert!(prog.send(Event::ctrl('c')).is_quit());

        let mut prog = searching("octocat");
        prog.resolve_fetches(|req| Ok(profile(&req.login)));
        assert!(prog.send(Event::key(KeyCode::Esc)).is_quit());

        let mut prog = searching("octocat");
        failed(&mut prog);
        assert!(prog.send(Event::ctrl('c')).is_quit());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut prog = searching("first");
        let stale = prog.component().generation();
        failed(&mut prog);
        prog.send(Event::key(KeyCode::Enter));
        assert_eq!(prog.component().state(), &LookupState::Loading);

        prog.send(Event::Fetched(FetchCompleted {
            source: SOURCE,
            request_id: stale,
            result: Ok(profile("first")),
        }));
        assert_eq!(prog.component().state(), &LookupState::Loading);
    }

    #[test]
    fn foreign_source_is_ignored() {
        let mut prog = searching("octocat");
        let id = prog.component().generation();
        prog.send(Event::Fetched(FetchCompleted {
            source: "elsewhere",
            request_id: id,
            result: Ok(profile("octocat")),
        }));
        assert_eq!(prog.component().state(), &LookupState::Loading);
    }

    #[test]
    fn completion_outside_loading_is_ignored() {
        let mut prog = TestProgram::new(UserLookup::new());
        prog.send(Event::Fetched(FetchCompleted {
            source: SOURCE,
            request_id: 0,
            result: Ok(profile("octocat")),
        }));
        assert_eq!(prog.component().state(), &LookupState::Input);
    }

    #[test]
    fn spinner_runs_only_while_loading() {
        let mut prog = searching("octocat");
        prog.fire_tick(SPINNER_ID);
        assert!(prog.pending_ticks().contains(&SPINNER_ID));

        prog.resolve_fetches(|req| Ok(profile(&req.login)));
        prog.fire_tick(SPINNER_ID);
        assert!(!prog.pending_ticks().contains(&SPINNER_ID));
    }

    #[test]
    fn keys_are_ignored_while_loading() {
        let mut prog = searching("octocat");
        assert!(prog.send(Event::key(KeyCode::Esc)).is_none());
        assert!(prog.send(Event::char('x')).is_none());
        assert_eq!(prog.component().state(), &LookupState::Loading);
    }
}
