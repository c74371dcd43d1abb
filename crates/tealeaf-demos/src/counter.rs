//! A signed counter.

use crossterm::event::KeyCode;
use ratatui::text::{Line, Span, Text};
use tealeaf_core::{Component, Effect, Event, Theme};
use tealeaf_widgets::key::{help_line, Binding, KeyCombination};

/// Key bindings for [`Counter`].
#[derive(Debug, Clone)]
pub struct CounterKeys {
    pub increment: Binding,
    pub decrement: Binding,
    pub reset: Binding,
    pub quit: Binding,
}

impl Default for CounterKeys {
    fn default() -> Self {
        Self {
            increment: Binding::new(
                [KeyCombination::new(KeyCode::Up), KeyCombination::char('k')],
                "↑/k",
                "increment",
            ),
            decrement: Binding::new(
                [KeyCombination::new(KeyCode::Down), KeyCombination::char('j')],
                "↓/j",
                "decrement",
            ),
            reset: Binding::new(
                [KeyCombination::char(' '), KeyCombination::char('r')],
                "space/r",
                "reset",
            ),
            quit: Binding::new(
                [KeyCombination::char('q'), KeyCombination::ctrl(KeyCode::Char('c'))],
                "q/ctrl+c",
                "quit",
            ),
        }
    }
}

/// Counts up and down from zero.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    count: i64,
    keys: CounterKeys,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl Component for Counter {
    fn update(&mut self, event: &Event) -> Effect {
        let Event::Key(key) = event else {
            return Effect::none();
        };

        if self.keys.increment.matches(key) {
            self.count = self.count.saturating_add(1);
        } else if self.keys.decrement.matches(key) {
            self.count = self.count.saturating_sub(1);
        } else if self.keys.reset.matches(key) {
            self.count = 0;
        } else if self.keys.quit.matches(key) {
            return Effect::quit();
        }
        Effect::none()
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        let count_style = match self.count {
            n if n > 0 => theme.success,
            n if n < 0 => theme.error,
            _ => theme.value,
        };

        Text::from(vec![
            Line::from(vec![
                Span::styled("Counter: ", theme.title),
                Span::styled(self.count.to_string(), count_style),
            ]),
            Line::default(),
            help_line([&self.keys.increment, &self.keys.decrement], theme),
            help_line([&self.keys.reset, &self.keys.quit], theme),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tealeaf_core::testing::TestProgram;

    #[test]
    fn starts_at_zero() {
        let prog = TestProgram::new(Counter::new());
        assert_eq!(prog.component().count(), 0);
        assert!(prog.effect().is_none());
    }

    #[test]
    fn arrows_and_vim_keys_change_count() {
        let mut prog = TestProgram::new(Counter::new());
        prog.send_all([
            Event::key(KeyCode::Up),
            Event::char('k'),
            Event::char('k'),
            Event::key(KeyCode::Down),
        ]);
        assert_eq!(prog.component().count(), 2);
        prog.send_all([Event::char('j'), Event::char('j'), Event::char('j')]);
        assert_eq!(prog.component().count(), -1);
    }

    #[test]
    fn space_and_r_reset() {
        let mut prog = TestProgram::new(Counter::new());
        prog.send(Event::key(KeyCode::Up));
        prog.send(Event::char(' '));
        assert_eq!(prog.component().count(), 0);
        prog.send(Event::key(KeyCode::Down));
        prog.send(Event::char('r'));
        assert_eq!(prog.component().count(), 0);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut prog = TestProgram::new(Counter::new());
        assert!(prog.send(Event::char('q')).is_quit());
        assert!(prog.send(Event::ctrl('c')).is_quit());
        assert_eq!(prog.component().count(), 0);
    }

    #[test]
    fn non_key_events_are_ignored() {
        let mut prog = TestProgram::new(Counter::new());
        assert!(prog.send(Event::resize(10, 10)).is_none());
        assert_eq!(prog.component().count(), 0);
    }

    #[test]
    fn view_shows_count() {
        let mut prog = TestProgram::new(Counter::new());
        prog.send(Event::key(KeyCode::Down));
        assert_eq!(prog.view_lines()[0], "Counter: -1");
        assert!(prog.render_string(40, 4).contains("increment"));
    }
}
