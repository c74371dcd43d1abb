//! Core runtime for **tealeaf**.
//!
//! `tealeaf-core` provides the event and effect types, the component contract
//! and the runtime that drive every tealeaf demo.  The design follows the
//! [Elm Architecture]: a program is expressed as an **init -> update -> view**
//! cycle, with side effects returned as plain [`Effect`] values and executed
//! by the runtime.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | The init / update / view contract every app implements |
//! | [`Event`] | Key presses, pastes, resizes, tick and fetch completions |
//! | [`Effect`] | Describes deferred work: quit, a tick, a user fetch, or a batch |
//! | [`Theme`] | Styles handed to [`Component::view`] |
//! | [`Program`] | Wires a [`Component`] to a real terminal and drives the event loop |
//! | [`Fetcher`] | Executes user lookups; [`HttpFetcher`] is the HTTP implementation |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Component`] |
//!
//! # Architecture
//!
//! 1. **init** -- [`Component::init`] may return an [`Effect`] to kick off
//!    early work, such as a cursor blink.
//! 2. **view** -- The runtime calls [`Component::view`] and draws the
//!    returned text.
//! 3. **event** -- Terminal input and effect completions arrive as
//!    [`Event`]s on one channel.
//! 4. **update** -- [`Component::update`] receives an event, mutates state,
//!    and returns an [`Effect`].  The runtime executes it on tokio tasks and
//!    feeds the result back as a new event.
//! 5. **repeat** -- Steps 2-4 repeat until an [`Effect::Quit`].
//!
//! # Quick example
//!
//! ```ignore
//! use tealeaf_core::{Component, Effect, Event, Theme};
//! use crossterm::event::KeyCode;
//! use ratatui::text::Text;
//!
//! struct Counter { count: i64 }
//!
//! impl Component for Counter {
//!     fn update(&mut self, event: &Event) -> Effect {
//!         match event.as_key().map(|k| k.code) {
//!             Some(KeyCode::Up) => self.count += 1,
//!             Some(KeyCode::Down) => self.count -= 1,
//!             Some(KeyCode::Char('q')) => return Effect::quit(),
//!             _ => {}
//!         }
//!         Effect::none()
//!     }
//!
//!     fn view(&self, theme: &Theme) -> Text<'static> {
//!         Text::styled(format!("Count: {}", self.count), theme.accent)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tealeaf_core::ProgramError> {
//!     tealeaf_core::run(Counter { count: 0 }).await?;
//!     Ok(())
//! }
//! ```
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod component;
pub mod effect;
pub mod event;
pub mod fetch;
mod input;
pub mod runtime;
pub mod testing;
pub mod theme;

pub use component::Component;
pub use effect::{Effect, FetchRequest};
pub use event::{is_interrupt, Event, FetchCompleted};
pub use fetch::{FetchConfig, FetchError, Fetcher, HttpFetcher, UserProfile};
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use theme::Theme;

/// Run a component with default options.
pub async fn run<C: Component>(component: C) -> Result<C, ProgramError> {
    Program::new(component)?.run().await
}

/// Run with custom options.
pub async fn run_with<C: Component>(
    component: C,
    options: ProgramOptions,
) -> Result<C, ProgramError> {
    Program::with_options(component, options)?.run().await
}
