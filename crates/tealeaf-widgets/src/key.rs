//! Key binding definitions and one-line help rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Span};
use tealeaf_core::Theme;

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Key label shown in help text, e.g. `"↑/k"`.
    pub label: String,
    /// A human-readable description of the action this binding performs.
    pub description: String,
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code (e.g. a character, arrow key, or function key).
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a binding for one or more key combinations.
    pub fn new(
        keys: impl IntoIterator<Item = KeyCombination>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            label: label.into(),
            description: description.into(),
        }
    }

    /// Return whether the given key event matches any of this binding's key combinations.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| k.matches(event))
    }
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create a key combination for a printable character.
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// Create a key combination with the Ctrl modifier.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Create a key combination with the Alt modifier.
    pub const fn alt(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::ALT,
        }
    }

    /// Whether `event` is this combination.
    ///
    /// Modifiers must match exactly, except that Shift is ignored unless the
    /// combination asks for it: terminals report Shift on uppercase letters
    /// and on BackTab inconsistently.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            event.modifiers == self.modifiers
        } else {
            event.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers
        }
    }
}

/// Render bindings as `label description • label description ...`.
pub fn help_line<'a>(bindings: impl IntoIterator<Item = &'a Binding>, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, binding) in bindings.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2022} ", theme.muted));
        }
        spans.push(Span::styled(binding.label.clone(), theme.accent));
        spans.push(Span::styled(format!(" {}", binding.description), theme.help));
    }
    Line::from(spans)
}
