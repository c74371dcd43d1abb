//! Single-line text field with a blinking cursor.
//!
//! `TextField` is a building block, not a [`Component`](tealeaf_core::Component):
//! the owning component forwards events to [`TextField::update`] and places
//! the rendered [`Line`] wherever it likes.
//!
//! # Cursor blink
//!
//! The cursor blinks through a tick chain tagged with the field's id.
//! [`focus`](TextField::focus) and [`blink`](TextField::blink) start the
//! chain; each blink tick toggles the cursor and schedules the next one while
//! the field is focused.  A tick that arrives after [`blur`](TextField::blur)
//! ends the chain.  At most one chain is live per field, so calling `blink`
//! repeatedly never speeds the cursor up.
//!
//! # Example
//!
//! ```rust,ignore
//! use tealeaf_widgets::text_field::TextField;
//!
//! let mut name = TextField::new("name")
//!     .with_placeholder("your name")
//!     .with_char_limit(50);
//! let blink = name.focus();           // Effect::tick(530ms, "name")
//!
//! // In the parent's update:
//! let effect = name.update(&event);
//!
//! // In the parent's view:
//! lines.push(name.view(theme));
//! ```

use crate::runeutil::sanitize;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::Duration;
use tealeaf_core::{Effect, Event, Theme};

/// Default interval between cursor blink toggles.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// An editable single line of text.
#[derive(Debug, Clone)]
pub struct TextField {
    id: &'static str,
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    placeholder: String,
    prompt: String,
    char_limit: Option<usize>,
    width: Option<usize>,
    cursor_visible: bool,
    blinking: bool,
}

impl TextField {
    /// Create an empty, unfocused field whose blink ticks are tagged `id`.
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            value: Vec::new(),
            cursor: 0,
            focus: false,
            placeholder: String::new(),
            prompt: String::new(),
            char_limit: None,
            width: None,
            cursor_visible: true,
            blinking: false,
        }
    }

    /// Text shown while the field is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Text shown before the value, e.g. `"> "`.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Maximum number of characters the field accepts.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    /// Visible width in columns; longer values scroll to keep the cursor in view.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// The tag carried by this field's blink ticks.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Give the field keyboard focus and start the cursor blink.
    pub fn focus(&mut self) -> Effect {
        self.focus = true;
        self.cursor_visible = true;
        self.blink()
    }

    /// Remove keyboard focus.  The blink chain ends on its next tick.
    pub fn blur(&mut self) {
        self.focus = false;
        self.cursor_visible = false;
    }

    /// Whether the field has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focus
    }

    /// Start the blink chain if the field is focused and no chain is live.
    pub fn blink(&mut self) -> Effect {
        if !self.focus || self.blinking {
            return Effect::none();
        }
        self.blinking = true;
        Effect::tick(BLINK_INTERVAL, self.id)
    }

    /// Whether the cursor is currently drawn.
    pub fn cursor_visible(&self) -> bool {
        self.focus && self.cursor_visible
    }

    /// Get the current value as a String.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the value (truncated to the char limit) and move the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        let limit = self.char_limit.unwrap_or(usize::MAX);
        self.value = value.chars().take(limit).collect();
        self.cursor = self.value.len();
    }

    /// Clear the value and reset the cursor to position 0.
    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Return the current cursor position (character index).
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Whether the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Return the number of characters in the value.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Handle an event addressed to this field.
    ///
    /// Blink ticks with this field's tag toggle the cursor.  Keys and pastes
    /// edit the value while focused.  Everything else is ignored.
    pub fn update(&mut self, event: &Event) -> Effect {
        match event {
            Event::Tick { tag, .. } if *tag == self.id => {
                if !self.focus {
                    self.blinking = false;
                    return Effect::none();
                }
                self.cursor_visible = !self.cursor_visible;
                Effect::tick(BLINK_INTERVAL, self.id)
            }
            Event::Key(key) => {
                self.handle_key(key);
                Effect::none()
            }
            Event::Paste(text) => {
                self.insert_paste(text);
                Effect::none()
            }
            _ => Effect::none(),
        }
    }

    /// Apply an editing key.  Returns `true` if the value changed.
    ///
    /// Does nothing while unfocused.  Any key shows the cursor so it never
    /// disappears mid-edit.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focus {
            return false;
        }
        self.cursor_visible = true;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.len(),
            KeyCode::Char('u') if ctrl => return self.delete_to_start(),
            KeyCode::Char('k') if ctrl => return self.delete_to_end(),
            KeyCode::Char('w') if ctrl => return self.delete_word_backward(),
            KeyCode::Backspace if alt => return self.delete_word_backward(),
            KeyCode::Char(c) if !ctrl && !alt => return self.insert_char(c),
            KeyCode::Backspace => return self.delete_char_backward(),
            KeyCode::Delete => return self.delete_char_forward(),
            KeyCode::Left if ctrl || alt => self.move_cursor_word_left(),
            KeyCode::Right if ctrl || alt => self.move_cursor_word_right(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => {}
        }
        false
    }

    fn has_room(&self) -> bool {
        self.char_limit.is_none_or(|limit| self.value.len() < limit)
    }

    fn insert_char(&mut self, c: char) -> bool {
        if !self.has_room() {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Insert pasted text at the cursor, dropping newlines and whatever
    /// exceeds the char limit.  Returns `true` if anything was inserted.
    pub fn insert_paste(&mut self, text: &str) -> bool {
        if !self.focus {
            return false;
        }
        let available = self
            .char_limit
            .map_or(usize::MAX, |limit| limit.saturating_sub(self.value.len()));
        let chars: Vec<char> = sanitize(text).chars().take(available).collect();
        if chars.is_empty() {
            return false;
        }
        let count = chars.len();
        self.value.splice(self.cursor..self.cursor, chars);
        self.cursor += count;
        true
    }

    fn delete_char_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        true
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }

    fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.value.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    fn delete_to_end(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.truncate(self.cursor);
        true
    }

    fn delete_word_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let end = self.cursor;
        while self.cursor > 0 && self.value[self.cursor - 1] == ' ' {
            self.cursor -= 1;
        }
        while self.cursor > 0 && self.value[self.cursor - 1] != ' ' {
            self.cursor -= 1;
        }
        self.value.drain(self.cursor..end);
        true
    }

    fn move_cursor_word_left(&mut self) {
        while self.cursor > 0 && !self.value[self.cursor - 1].is_alphanumeric() {
            self.cursor -= 1;
        }
        while self.cursor > 0 && self.value[self.cursor - 1].is_alphanumeric() {
            self.cursor -= 1;
        }
    }

    fn move_cursor_word_right(&mut self) {
        let len = self.value.len();
        while self.cursor < len && self.value[self.cursor].is_alphanumeric() {
            self.cursor += 1;
        }
        while self.cursor < len && !self.value[self.cursor].is_alphanumeric() {
            self.cursor += 1;
        }
    }

    /// Render the prompt, value and cursor as one line.
    pub fn view(&self, theme: &Theme) -> Line<'static> {
        let cursor_style = Style::new().add_modifier(Modifier::REVERSED);
        let mut spans = Vec::new();

        if !self.prompt.is_empty() {
            spans.push(Span::styled(self.prompt.clone(), theme.label));
        }

        if self.value.is_empty() {
            let mut placeholder = self.placeholder.chars();
            if self.cursor_visible() {
                let first = placeholder.next().map_or(" ".to_string(), String::from);
                spans.push(Span::styled(first, cursor_style));
            }
            let rest: String = placeholder.collect();
            if !rest.is_empty() {
                spans.push(Span::styled(rest, theme.muted));
            }
            return Line::from(spans);
        }

        // Scroll horizontally so the cursor stays inside `width` columns.
        let width = self.width.unwrap_or(usize::MAX).max(1);
        let offset = (self.cursor + 1).saturating_sub(width);
        let end = (offset + width).min(self.value.len());
        let visible = &self.value[offset..end];
        let cursor = self.cursor - offset;

        if !self.cursor_visible() {
            spans.push(Span::raw(visible.iter().collect::<String>()));
            return Line::from(spans);
        }

        let before: String = visible[..cursor.min(visible.len())].iter().collect();
        if !before.is_empty() {
            spans.push(Span::raw(before));
        }
        match visible.get(cursor) {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), cursor_style));
                let after: String = visible[cursor + 1..].iter().collect();
                if !after.is_empty() {
                    spans.push(Span::raw(after));
                }
            }
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn focused() -> TextField {
        let mut field = TextField::new("field");
        field.focus();
        field
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(&key(KeyCode::Char(c)));
        }
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn new_text_field_is_empty() {
        let field = TextField::new("field");
        assert_eq!(field.value(), "");
        assert!(field.is_empty());
        assert!(!field.is_focused());
    }

    #[test]
    fn typing_characters() {
        let mut field = focused();
        type_str(&mut field, "hi");
        assert_eq!(field.value(), "hi");
        assert_eq!(field.cursor_position(), 2);
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut field = TextField::new("field");
        assert!(!field.handle_key(&key(KeyCode::Char('a'))));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn backspace_and_delete() {
        let mut field = focused();
        type_str(&mut field, "abc");
        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "ab");
        field.handle_key(&key(KeyCode::Home));
        field.handle_key(&key(KeyCode::Delete));
        assert_eq!(field.value(), "b");
        assert!(!field.handle_key(&key(KeyCode::Left)));
    }

    #[test]
    fn cursor_movement_inserts_mid_value() {
        let mut field = focused();
        type_str(&mut field, "abc");
        field.handle_key(&key(KeyCode::Left));
        field.handle_key(&key(KeyCode::Left));
        field.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(field.value(), "axbc");
        field.handle_key(&key_ctrl(KeyCode::Char('e')));
        field.handle_key(&key(KeyCode::Char('!')));
        assert_eq!(field.value(), "axbc!");
    }

    #[test]
    fn ctrl_u_and_ctrl_k() {
        let mut field = focused();
        type_str(&mut field, "hello world");
        for _ in 0..5 {
            field.handle_key(&key(KeyCode::Left));
        }
        field.handle_key(&key_ctrl(KeyCode::Char('k')));
        assert_eq!(field.value(), "hello ");
        field.handle_key(&key_ctrl(KeyCode::Char('u')));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut field = focused();
        type_str(&mut field, "foo bar  ");
        field.handle_key(&key_ctrl(KeyCode::Char('w')));
        assert_eq!(field.value(), "foo ");
    }

    #[test]
    fn char_limit_is_enforced() {
        let mut field = TextField::new("field").with_char_limit(3);
        field.focus();
        type_str(&mut field, "abcd");
        assert_eq!(field.value(), "abc");
        field.set_value("wxyz");
        assert_eq!(field.value(), "wxy");
    }

    #[test]
    fn paste_respects_limit_and_drops_newlines() {
        let mut field = TextField::new("field").with_char_limit(5);
        field.focus();
        assert!(field.update(&Event::Paste("ab\ncdef".into())).is_none());
        assert_eq!(field.value(), "abcde");
    }

    #[test]
    fn focus_starts_a_single_blink_chain() {
        let mut field = TextField::new("field");
        assert_eq!(field.focus().ticks(), vec!["field"]);
        assert!(field.blink().is_none());
        assert!(field.focus().is_none());
    }

    #[test]
    fn blink_tick_toggles_cursor_and_renews() {
        let mut field = focused();
        let tick = Event::Tick {
            tag: "field",
            at: std::time::Instant::now(),
        };
        assert!(field.cursor_visible());
        assert_eq!(field.update(&tick).ticks(), vec!["field"]);
        assert!(!field.cursor_visible());
        field.update(&tick);
        assert!(field.cursor_visible());
    }

    #[test]
    fn blink_chain_ends_after_blur() {
        let mut field = focused();
        field.blur();
        let tick = Event::Tick {
            tag: "field",
            at: std::time::Instant::now(),
        };
        assert!(field.update(&tick).is_none());
        // The chain can be restarted once it has ended.
        assert_eq!(field.focus().ticks(), vec!["field"]);
    }

    #[test]
    fn foreign_ticks_are_ignored() {
        let mut field = focused();
        let tick = Event::Tick {
            tag: "other",
            at: std::time::Instant::now(),
        };
        assert!(field.update(&tick).is_none());
        assert!(field.cursor_visible());
    }

    #[test]
    fn view_shows_placeholder_when_empty() {
        let field = TextField::new("field").with_placeholder("octocat");
        assert_eq!(line_text(&field.view(&Theme::plain())), "octocat");
    }

    #[test]
    fn view_scrolls_to_cursor() {
        let mut field = TextField::new("field").with_width(4);
        field.focus();
        type_str(&mut field, "abcdef");
        // Cursor sits after "f"; the last three chars plus the cursor cell fit.
        assert_eq!(line_text(&field.view(&Theme::plain())), "def ");
    }
}
