//! Building blocks for **tealeaf** components.
//!
//! Nothing in this crate implements [`tealeaf_core::Component`] on its own.
//! These are the parts a component is assembled from: an owner forwards
//! events to a widget's `update`, collects the [`Effect`](tealeaf_core::Effect)
//! it returns, and places the widget's rendered line in its own view.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`text_field`] | Single-line text input with a blinking cursor |
//! | [`spinner`] | Tick-driven loading spinner |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chrome`] | Fit text to a rectangle, draw bordered panels, tile them |
//! | [`focus`] | [`FocusRing`](focus::FocusRing) for circular focus over a fixed set of stops |
//! | [`key`] | Key bindings and one-line help rendering |
//! | [`runeutil`] | Unicode-aware string width and truncation utilities |

pub mod chrome;
pub mod focus;
pub mod key;
pub mod runeutil;
pub mod spinner;
pub mod text_field;

pub use chrome::{fit, panel, BorderKind};
pub use focus::FocusRing;
pub use key::{help_line, Binding, KeyCombination};
pub use spinner::Spinner;
pub use tealeaf_core::Theme;
pub use text_field::TextField;
