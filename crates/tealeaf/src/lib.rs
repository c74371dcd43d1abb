//! **tealeaf** -- small interactive terminal demos on an Elm-style runtime.
//!
//! This is the umbrella crate that re-exports the whole stack from a single
//! dependency:
//!
//! * All public items from [`tealeaf_core`] are available at the crate root
//!   ([`Component`], [`Event`], [`Effect`], [`Program`], [`run`],
//!   [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`tealeaf_widgets`] (text field,
//!   spinner, focus ring, key bindings, panel chrome).
//! * The [`demos`] module re-exports [`tealeaf_demos`] (counter, timer, to-do
//!   list, form, user lookup and the dashboard).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use tealeaf::demos::Dashboard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tealeaf::ProgramError> {
//!     tealeaf::run(Dashboard::new()).await?;
//!     Ok(())
//! }
//! ```

pub use tealeaf_core::*;
pub mod widgets {
    pub use tealeaf_widgets::*;
}
pub mod demos {
    pub use tealeaf_demos::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
