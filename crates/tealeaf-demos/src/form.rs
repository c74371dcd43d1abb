//! A two-field registration form with validation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use regex::Regex;
use std::sync::LazyLock;
use tealeaf_core::{is_interrupt, Component, Effect, Event, Theme};
use tealeaf_widgets::focus::FocusRing;
use tealeaf_widgets::text_field::TextField;
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

const NAME: usize = 0;
const EMAIL: usize = 1;
const SUBMIT: usize = 2;

/// Visible width of both inputs.
pub const FIELD_WIDTH: usize = 30;
pub const NAME_LIMIT: usize = 50;
pub const EMAIL_LIMIT: usize = 100;

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email address is invalid")]
    InvalidEmail,
}

/// Trimmed values of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
}

impl FormData {
    /// Trim both values and check them, name first.
    pub fn validate(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Form lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitted(FormData),
}

/// Name and email inputs followed by a submit button.
///
/// Focus cycles through three stops; the third is the button.  The focused
/// input owns the blinking cursor and receives typed keys and pastes.
#[derive(Debug, Clone)]
pub struct Form {
    fields: [TextField; 2],
    focus: FocusRing<3>,
    state: FormState,
    error: Option<ValidationError>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        let name = TextField::new("form.name")
            .with_placeholder("e.g. Jane Doe")
            .with_char_limit(NAME_LIMIT)
            .with_width(FIELD_WIDTH);
        let email = TextField::new("form.email")
            .with_placeholder("e.g. jane@example.com")
            .with_char_limit(EMAIL_LIMIT)
            .with_width(FIELD_WIDTH);
        Self {
            fields: [name, email],
            focus: FocusRing::new(),
            state: FormState::Editing,
            error: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Index of the focused stop: 0 name, 1 email, 2 submit.
    pub fn focused(&self) -> usize {
        self.focus.focused()
    }

    pub fn name(&self) -> String {
        self.fields[NAME].value()
    }

    pub fn email(&self) -> String {
        self.fields[EMAIL].value()
    }

    fn move_focus(&mut self, forward: bool) -> Effect {
        if forward {
            self.focus.focus_next();
        } else {
            self.focus.focus_prev();
        }
        for field in &mut self.fields {
            field.blur();
        }
        match self.fields.get_mut(self.focus.focused()) {
            Some(field) => field.focus(),
            None => Effect::none(),
        }
    }

    fn submit(&mut self) {
        match FormData::validate(&self.name(), &self.email()) {
            Ok(data) => {
                tracing::info!(name = %data.name, "Form submitted");
                self.error = None;
                self.state = FormState::Submitted(data);
            }
            Err(err) => {
                tracing::debug!(%err, "Form rejected");
                self.error = Some(err);
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Effect {
        if is_interrupt(key) || key.code == KeyCode::Esc {
            return Effect::quit();
        }
        if matches!(self.state, FormState::Submitted(_)) {
            return match key.code {
                KeyCode::Char('q') => Effect::quit(),
                _ => Effect::none(),
            };
        }

        match key.code {
            KeyCode::Enter if self.focus.is_focused(SUBMIT) => {
                self.submit();
                Effect::none()
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus.focused()) {
                    field.handle_key(key);
                    self.error = None;
                }
                Effect::none()
            }
        }
    }

    fn field_view(&self, index: usize, label: &str, theme: &Theme) -> [Line<'static>; 2] {
        let label_style = if self.focus.is_focused(index) {
            theme.selected
        } else {
            theme.label
        };
        [
            Line::styled(label.to_string(), label_style),
            self.fields[index].view(theme),
        ]
    }
}

impl Component for Form {
    fn init(&mut self) -> Effect {
        self.fields[NAME].focus()
    }

    fn update(&mut self, event: &Event) -> Effect {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) if self.state == FormState::Editing => {
                if let Some(field) = self.fields.get_mut(self.focus.focused()) {
                    field.insert_paste(text);
                    self.error = None;
                }
                Effect::none()
            }
            Event::Tick { .. } => {
                Effect::batch(self.fields.iter_mut().map(|field| field.update(event)))
            }
            _ => Effect::none(),
        }
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        if let FormState::Submitted(data) = &self.state {
            return Text::from(vec![
                Line::styled("Form submitted", theme.title),
                Line::default(),
                Line::styled("Submitted successfully!", theme.success),
                Line::default(),
                Line::from(vec![
                    Span::styled("Name:  ", theme.label),
                    Span::styled(data.name.clone(), theme.value),
                ]),
                Line::from(vec![
                    Span::styled("Email: ", theme.label),
                    Span::styled(data.email.clone(), theme.value),
                ]),
                Line::default(),
                Line::styled("q: quit", theme.help),
            ]);
        }

        let mut lines = vec![Line::styled("Registration", theme.title), Line::default()];
        lines.extend(self.field_view(NAME, "Name:", theme));
        lines.push(Line::default());
        lines.extend(self.field_view(EMAIL, "Email:", theme));
        lines.push(Line::default());

        let button = if self.focus.is_focused(SUBMIT) {
            theme.selected.add_modifier(Modifier::REVERSED)
        } else {
            theme.label
        };
        lines.push(Line::styled("[ Submit ]", button));

        if let Some(err) = self.error {
            lines.push(Line::styled(format!("Error: {}", err), theme.error));
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "Tab: next  Shift+Tab: back  Enter: confirm  Esc: quit",
            theme.help,
        ));
        Text::from(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tealeaf_core::testing::TestProgram;

    fn type_str(prog: &mut TestProgram<Form>, s: &str) {
        prog.send_all(s.chars().map(Event::char));
    }

    fn filled(name: &str, email: &str) -> TestProgram<Form> {
        let mut prog = TestProgram::new(Form::new());
        type_str(&mut prog, name);
        prog.send(Event::key(KeyCode::Tab));
        type_str(&mut prog, email);
        prog.send(Event::key(KeyCode::Tab));
        prog
    }

    #[test]
    fn init_focuses_name_and_blinks() {
        let prog = TestProgram::new(Form::new());
        assert_eq!(prog.component().focused(), NAME);
        assert_eq!(prog.pending_ticks(), vec!["form.name"]);
    }

    #[test]
    fn email_pattern() {
        for bad in ["invalid", "@x.com", "a@", "a@b", "a.b@c"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        for good in ["a@b.com", "a.b+c@d.e.fg"] {
            assert!(is_valid_email(good), "{good} should be accepted");
        }
    }

    #[test]
    fn validation_order() {
        assert_eq!(FormData::validate("  ", "x"), Err(ValidationError::MissingName));
        assert_eq!(FormData::validate("a", " "), Err(ValidationError::MissingEmail));
        assert_eq!(FormData::validate("a", "nope"), Err(ValidationError::InvalidEmail));
        assert!(ValidationError::MissingName.to_string().contains("name"));
    }

    #[test]
    fn focus_cycles_through_three_stops() {
        let mut prog = TestProgram::new(Form::new());
        prog.send(Event::key(KeyCode::Tab));
        assert_eq!(prog.component().focused(), EMAIL);
        prog.send(Event::key(KeyCode::Down));
        assert_eq!(prog.component().focused(), SUBMIT);
        prog.send(Event::key(KeyCode::Tab));
        assert_eq!(prog.component().focused(), NAME);
        prog.send(Event::key(KeyCode::BackTab));
        assert_eq!(prog.component().focused(), SUBMIT);
        prog.send(Event::key(KeyCode::Up));
        assert_eq!(prog.component().focused(), EMAIL);
    }

    #[test]
    fn enter_on_field_advances() {
        let mut prog = TestProgram::new(Form::new());
        let effect = prog.send(Event::key(KeyCode::Enter));
        assert_eq!(effect.ticks(), vec!["form.email"]);
        assert_eq!(prog.component().focused(), EMAIL);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let prog = filled("Ann", "ann@example.com");
        assert_eq!(prog.component().name(), "Ann");
        assert_eq!(prog.component().email(), "ann@example.com");
    }

    #[test]
    fn q_is_typed_while_editing() {
        let mut prog = TestProgram::new(Form::new());
        assert!(!prog.send(Event::char('q')).is_quit());
        assert!(!prog.has_quit());
        assert_eq!(prog.component().name(), "q");
    }

    #[test]
    fn empty_submit_sets_error_and_typing_clears_it() {
        let mut prog = filled("", "");
        prog.send(Event::key(KeyCode::Enter));
        assert_eq!(prog.component().error(), Some(ValidationError::MissingName));
        assert_eq!(prog.component().state(), &FormState::Editing);
        assert!(prog
            .view_lines()
            .iter()
            .any(|l| l == "Error: name is required"));

        prog.send(Event::key(KeyCode::Tab));
        prog.send(Event::char('x'));
        assert_eq!(prog.component().error(), None);
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut prog = filled("Ann", "ann@example");
        prog.send(Event::key(KeyCode::Enter));
        assert_eq!(prog.component().error(), Some(ValidationError::InvalidEmail));
    }

    #[test]
    fn valid_submit_stores_trimmed_copy() {
        let mut prog = filled("  Ann ", "ann@example.com ");
        prog.send(Event::key(KeyCode::Enter));
        assert_eq!(
            prog.component().state(),
            &FormState::Submitted(FormData {
                name: "Ann".into(),
                email: "ann@example.com".into(),
            })
        );
        assert!(prog.view_lines().contains(&"Name:  Ann".to_string()));
        assert!(prog.send(Event::char('q')).is_quit());
    }

    #[test]
    fn esc_and_ctrl_c_always_quit() {
        let mut prog = TestProgram::new(Form::new());
        assert!(prog.send(Event::key(KeyCode::Esc)).is_quit());
        assert!(prog.send(Event::ctrl('c')).is_quit());
    }

    #[test]
    fn paste_fills_focused_field() {
        let mut prog = TestProgram::new(Form::new());
        prog.send(Event::key(KeyCode::Tab));
        prog.send(Event::Paste("ann@example.com".into()));
        assert_eq!(prog.component().email(), "ann@example.com");
        assert_eq!(prog.component().name(), "");
    }

    #[test]
    fn name_respects_char_limit() {
        let mut prog = TestProgram::new(Form::new());
        type_str(&mut prog, &"x".repeat(60));
        assert_eq!(prog.component().name().len(), NAME_LIMIT);
    }

    #[test]
    fn blink_chain_moves_with_focus() {
        let mut prog = TestProgram::new(Form::new());
        prog.send(Event::key(KeyCode::Tab));
        assert_eq!(prog.pending_ticks(), vec!["form.name", "form.email"]);
        // The blurred name field lets its chain lapse.
        prog.fire_ticks();
        assert_eq!(prog.pending_ticks(), vec!["form.email"]);
    }
}
