//! A start/pause/reset stopwatch.

use crossterm::event::KeyCode;
use ratatui::text::{Line, Span, Text};
use std::time::{Duration, Instant};
use tealeaf_core::{Component, Effect, Event, Theme};
use tealeaf_widgets::key::{help_line, Binding, KeyCombination};
use tracing::debug;

/// Tag of the timer's tick chain.
pub const TICK_TAG: &str = "timer";

/// Interval between display refreshes while running.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Timer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl TimerState {
    fn label(self) -> &'static str {
        match self {
            TimerState::Stopped => "stopped",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
        }
    }
}

/// Key bindings for [`Timer`].
#[derive(Debug, Clone)]
pub struct TimerKeys {
    pub toggle: Binding,
    pub reset: Binding,
    pub quit: Binding,
}

impl Default for TimerKeys {
    fn default() -> Self {
        Self {
            toggle: Binding::new(
                [KeyCombination::char(' '), KeyCombination::char('s')],
                "s/space",
                "start/stop",
            ),
            reset: Binding::new([KeyCombination::char('r')], "r", "reset"),
            quit: Binding::new(
                [KeyCombination::char('q'), KeyCombination::ctrl(KeyCode::Char('c'))],
                "q",
                "quit",
            ),
        }
    }
}

/// Measures elapsed wall time across pauses.
///
/// `accumulated` holds the time banked by earlier runs; while running, the
/// displayed time is `accumulated` plus the time since `started`.  The
/// display refreshes on each tick of a self-renewing 100ms chain that
/// lapses on its own once the timer is no longer running.  At most one
/// chain is in flight: resuming while an old tick is still pending reuses it.
///
/// The toggle key reads the wall clock; [`Timer::toggle_at`] takes the
/// instant explicitly so tests can drive it deterministically.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    state: TimerState,
    accumulated: Duration,
    started: Option<Instant>,
    displayed: Duration,
    ticking: bool,
    keys: TimerKeys,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// The duration currently shown.
    pub fn displayed(&self) -> Duration {
        self.displayed
    }

    /// Start, pause or resume as of `now`.
    ///
    /// Only schedules a tick when no chain is already pending.
    pub fn toggle_at(&mut self, now: Instant) -> Effect {
        match self.state {
            TimerState::Stopped | TimerState::Paused => {
                self.state = TimerState::Running;
                self.started = Some(now);
                if self.ticking {
                    return Effect::none();
                }
                self.ticking = true;
                Effect::tick(TICK_INTERVAL, TICK_TAG)
            }
            TimerState::Running => {
                if let Some(started) = self.started.take() {
                    self.accumulated += now.saturating_duration_since(started);
                }
                self.state = TimerState::Paused;
                self.displayed = self.accumulated;
                Effect::none()
            }
        }
    }

    /// Stop and zero the timer.
    pub fn reset(&mut self) {
        self.state = TimerState::Stopped;
        self.accumulated = Duration::ZERO;
        self.started = None;
        self.displayed = Duration::ZERO;
    }

    fn on_tick(&mut self, at: Instant) -> Effect {
        match (self.state, self.started) {
            (TimerState::Running, Some(started)) => {
                self.displayed = self.accumulated + at.saturating_duration_since(started);
                Effect::tick(TICK_INTERVAL, TICK_TAG)
            }
            _ => {
                self.ticking = false;
                Effect::none()
            }
        }
    }
}

impl Component for Timer {
    fn update(&mut self, event: &Event) -> Effect {
        match event {
            Event::Tick { tag, at } if *tag == TICK_TAG => self.on_tick(*at),
            Event::Key(key) if self.keys.toggle.matches(key) => {
                let effect = self.toggle_at(Instant::now());
                debug!(state = ?self.state, "Timer toggled");
                effect
            }
            Event::Key(key) if self.keys.reset.matches(key) => {
                self.reset();
                Effect::none()
            }
            Event::Key(key) if self.keys.quit.matches(key) => Effect::quit(),
            _ => Effect::none(),
        }
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        Text::from(vec![
            Line::styled("Timer", theme.title),
            Line::default(),
            Line::styled(format_duration(self.displayed), theme.accent),
            Line::default(),
            Line::from(vec![
                Span::styled("state: ", theme.label),
                Span::styled(self.state.label(), theme.muted),
            ]),
            Line::default(),
            help_line([&self.keys.toggle, &self.keys.reset, &self.keys.quit], theme),
        ])
    }
}

/// Format as `MM:SS.d`.  Minutes keep counting past 59; there is no hour field.
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let tenths = d.subsec_millis() / 100;
    format!("{:02}:{:02}.{}", minutes, seconds, tenths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tealeaf_core::testing::TestProgram;

    fn tick_at(at: Instant) -> Event {
        Event::Tick { tag: TICK_TAG, at }
    }

    #[test]
    fn format_duration_cases() {
        assert_eq!(format_duration(Duration::ZERO), "00:00.0");
        assert_eq!(format_duration(Duration::from_millis(90_500)), "01:30.5");
        assert_eq!(format_duration(Duration::from_millis(3_600_000)), "60:00.0");
        assert_eq!(format_duration(Duration::from_millis(59_999)), "00:59.9");
    }

    #[test]
    fn start_schedules_tick() {
        let mut prog = TestProgram::new(Timer::new());
        let effect = prog.send(Event::char('s'));
        assert_eq!(effect.ticks(), vec![TICK_TAG]);
        assert_eq!(prog.component().state(), TimerState::Running);
    }

    #[test]
    fn space_toggles_too() {
        let mut prog = TestProgram::new(Timer::new());
        prog.send(Event::char(' '));
        assert_eq!(prog.component().state(), TimerState::Running);
        assert!(prog.send(Event::char(' ')).is_none());
        assert_eq!(prog.component().state(), TimerState::Paused);
    }

    #[test]
    fn start_wait_stop_shows_elapsed() {
        let mut timer = Timer::new();
        let t0 = Instant::now();
        timer.toggle_at(t0);
        timer.update(&tick_at(t0 + Duration::from_millis(100)));
        timer.update(&tick_at(t0 + Duration::from_millis(200)));
        timer.toggle_at(t0 + Duration::from_millis(250));
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.displayed(), Duration::from_millis(250));
    }

    #[test]
    fn pause_resume_accumulates() {
        let mut timer = Timer::new();
        let t0 = Instant::now();
        timer.toggle_at(t0);
        timer.toggle_at(t0 + Duration::from_secs(2));
        // The first chain's tick is still pending, so resuming adds none.
        assert!(timer.toggle_at(t0 + Duration::from_secs(10)).is_none());
        // Time spent paused does not count.
        timer.update(&tick_at(t0 + Duration::from_secs(11)));
        assert_eq!(timer.displayed(), Duration::from_secs(3));
    }

    #[test]
    fn repeated_toggles_keep_one_tick_chain() {
        let mut prog = TestProgram::new(Timer::new());
        prog.send(Event::char('s'));
        for _ in 0..5 {
            prog.send(Event::char('s'));
            prog.send(Event::char('s'));
        }
        assert_eq!(prog.component().state(), TimerState::Running);
        for _ in 0..3 {
            prog.fire_ticks();
        }
        let pending = prog.pending_ticks();
        assert_eq!(pending.iter().filter(|tag| **tag == TICK_TAG).count(), 1);
    }

    #[test]
    fn resume_after_chain_lapsed_restarts_it() {
        let mut prog = TestProgram::new(Timer::new());
        prog.send(Event::char('s'));
        prog.send(Event::char('s'));
        // Paused: the pending tick lapses without renewing.
        prog.fire_ticks();
        assert!(prog.pending_ticks().is_empty());
        assert_eq!(prog.send(Event::char('s')).ticks(), vec![TICK_TAG]);
        assert_eq!(prog.pending_ticks(), vec![TICK_TAG]);
    }

    #[test]
    fn tick_renews_only_while_running() {
        let mut timer = Timer::new();
        let t0 = Instant::now();
        assert!(timer.update(&tick_at(t0)).is_none());

        timer.toggle_at(t0);
        assert_eq!(timer.update(&tick_at(t0)).ticks(), vec![TICK_TAG]);

        timer.toggle_at(t0 + Duration::from_secs(1));
        let shown = timer.displayed();
        assert!(timer.update(&tick_at(t0 + Duration::from_secs(5))).is_none());
        assert_eq!(timer.displayed(), shown);
    }

    #[test]
    fn foreign_ticks_are_ignored() {
        let mut timer = Timer::new();
        let t0 = Instant::now();
        timer.toggle_at(t0);
        let foreign = Event::Tick {
            tag: "spinner",
            at: t0 + Duration::from_secs(1),
        };
        assert!(timer.update(&foreign).is_none());
        assert_eq!(timer.displayed(), Duration::ZERO);
    }

    #[test]
    fn reset_always_stops_and_zeroes() {
        let mut prog = TestProgram::new(Timer::new());
        prog.send(Event::char('s'));
        prog.fire_ticks();
        prog.send(Event::char('r'));
        assert_eq!(prog.component().state(), TimerState::Stopped);
        assert_eq!(prog.component().displayed(), Duration::ZERO);

        // The pending tick from the old run lapses.
        assert!(prog.pending_ticks().len() == 1);
        prog.fire_ticks();
        assert!(prog.pending_ticks().is_empty());
        assert_eq!(prog.component().displayed(), Duration::ZERO);
    }

    #[test]
    fn quit_keys() {
        let mut prog = TestProgram::new(Timer::new());
        assert!(prog.send(Event::char('q')).is_quit());
        assert!(prog.send(Event::ctrl('c')).is_quit());
    }

    #[test]
    fn view_shows_time_and_state() {
        let mut prog = TestProgram::new(Timer::new());
        let lines = prog.view_lines();
        assert_eq!(lines[2], "00:00.0");
        assert_eq!(lines[4], "state: stopped");
        prog.send(Event::char('s'));
        assert_eq!(prog.view_lines()[4], "state: running");
    }
}
