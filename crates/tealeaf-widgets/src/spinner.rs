//! Animated loading spinner driven by tagged ticks.

use ratatui::style::Style;
use ratatui::text::Span;
use std::time::Duration;
use tealeaf_core::{Effect, Event};

/// Built-in spinner frame sets.
pub mod frames {
    /// Braille dot spinner cycling through ten positions.
    pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    /// Classic ASCII line spinner: |, /, -, \.
    pub const LINE: &[&str] = &["|", "/", "-", "\\"];
    /// Growing ellipsis from empty to three dots.
    pub const ELLIPSIS: &[&str] = &["", ".", "..", "..."];
}

/// Default interval between frames.
pub const SPIN_INTERVAL: Duration = Duration::from_millis(100);

/// A spinner that cycles through a set of frames while its owner is busy.
///
/// The owner decides when the spinner is "active" (for example, while a
/// request is loading) and passes that flag to [`update`](Spinner::update).
/// The tick chain renews itself only while active, so a spinner left behind
/// by a state change stops on its own one tick later.
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    frame_index: usize,
    ticking: bool,
    id: &'static str,
}

impl Spinner {
    /// Create a new spinner whose ticks are tagged `id`.
    /// Defaults to the [`frames::DOTS`] frame set and a 100ms interval.
    pub fn new(id: &'static str) -> Self {
        Self {
            frames: frames::DOTS,
            frame_index: 0,
            ticking: false,
            id,
        }
    }

    /// Set the frame set used by this spinner (e.g. [`frames::LINE`]).
    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = frames;
        self
    }

    /// Start the tick chain.  No-op while a chain is already live.
    pub fn start(&mut self) -> Effect {
        if self.ticking {
            return Effect::none();
        }
        self.ticking = true;
        Effect::tick(SPIN_INTERVAL, self.id)
    }

    /// Whether a tick chain is live.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Advance on this spinner's own ticks while `active`.
    ///
    /// Returns the next tick when the chain continues, [`Effect::None`]
    /// otherwise.
    pub fn update(&mut self, event: &Event, active: bool) -> Effect {
        match event {
            Event::Tick { tag, .. } if *tag == self.id => {
                if !active {
                    self.ticking = false;
                    return Effect::none();
                }
                if !self.frames.is_empty() {
                    self.frame_index = (self.frame_index + 1) % self.frames.len();
                }
                Effect::tick(SPIN_INTERVAL, self.id)
            }
            _ => Effect::none(),
        }
    }

    /// The current frame.
    pub fn frame(&self) -> &'static str {
        self.frames.get(self.frame_index).copied().unwrap_or("")
    }

    /// The current frame as a styled span.
    pub fn view(&self, style: Style) -> Span<'static> {
        Span::styled(self.frame(), style)
    }
}
