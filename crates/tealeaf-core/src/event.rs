use crate::fetch::{FetchError, UserProfile};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

/// One unit of input delivered to [`Component::update`](crate::Component::update).
///
/// Terminal input arrives as [`Key`](Event::Key), [`Paste`](Event::Paste) and
/// [`Resize`](Event::Resize).  The other two variants are completions of
/// [`Effect`](crate::Effect)s the runtime executed on a component's behalf:
/// a [`Tick`](Event::Tick) carries the tag it was scheduled with and a
/// [`Fetched`](Event::Fetched) carries the source and request id of the fetch,
/// so a component can ignore completions that belong to someone else.
///
/// # Example
///
/// ```rust,ignore
/// use tealeaf_core::Event;
///
/// match event {
///     Event::Key(key) if key.code == KeyCode::Char('q') => Effect::quit(),
///     Event::Tick { tag: "timer", at } => self.on_tick(*at),
///     _ => Effect::none(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Bracketed paste content.
    Paste(String),
    /// Terminal (or panel) resized to `width` columns and `height` rows.
    Resize { width: u16, height: u16 },
    /// A tick scheduled with [`Effect::tick`](crate::Effect::tick) fired.
    Tick { tag: &'static str, at: Instant },
    /// A user fetch finished.
    Fetched(FetchCompleted),
}

/// Completion of an [`Effect::FetchUser`](crate::Effect::FetchUser).
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompleted {
    /// Tag of the component that issued the request.
    pub source: &'static str,
    /// Generation id the component attached to the request.
    pub request_id: u64,
    /// The fetched profile or a descriptive error; never both.
    pub result: Result<UserProfile, FetchError>,
}

impl Event {
    /// Convert a raw crossterm event.
    ///
    /// Returns `None` for events no component consumes (mouse, focus) and for
    /// key releases/repeats reported by terminals with the kitty protocol.
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(Event::Key(key))
            }
            crossterm::event::Event::Resize(width, height) => {
                Some(Event::Resize { width, height })
            }
            crossterm::event::Event::Paste(text) => Some(Event::Paste(text)),
            _ => None,
        }
    }

    /// A key press without modifiers.
    pub fn key(code: KeyCode) -> Self {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// A printable character key press.
    pub fn char(c: char) -> Self {
        Event::key(KeyCode::Char(c))
    }

    /// A Ctrl+`c` key press.
    pub fn ctrl(c: char) -> Self {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// A resize notification.
    pub fn resize(width: u16, height: u16) -> Self {
        Event::Resize { width, height }
    }

    /// Returns the key if this is a key event.
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Event::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Whether the event is keyboard input (a key press or a paste).
    pub fn is_input(&self) -> bool {
        matches!(self, Event::Key(_) | Event::Paste(_))
    }
}

/// Whether `key` is Ctrl+C, which every demo treats as quit.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
