//! Demo applications built on tealeaf.
//!
//! Each demo is a standalone [`Component`]; [`Dashboard`] hosts four of them
//! side by side.  [`Demo`] names them for the command line.

pub mod counter;
pub mod dashboard;
pub mod form;
pub mod timer;
pub mod todo;
pub mod user_lookup;

pub use counter::Counter;
pub use dashboard::Dashboard;
pub use form::Form;
pub use timer::Timer;
pub use todo::TodoList;
pub use user_lookup::UserLookup;

use tealeaf_core::Component;

/// A runnable demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Counter,
    Timer,
    Todo,
    Form,
    UserLookup,
    Dashboard,
}

impl Demo {
    pub const ALL: [Demo; 6] = [
        Demo::Counter,
        Demo::Timer,
        Demo::Todo,
        Demo::Form,
        Demo::UserLookup,
        Demo::Dashboard,
    ];

    /// Parse a command-line name.  Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "counter" => Some(Demo::Counter),
            "timer" => Some(Demo::Timer),
            "todo" => Some(Demo::Todo),
            "form" => Some(Demo::Form),
            "github" | "userlookup" | "user-lookup" => Some(Demo::UserLookup),
            "dashboard" => Some(Demo::Dashboard),
            _ => None,
        }
    }

    /// The canonical command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Demo::Counter => "counter",
            Demo::Timer => "timer",
            Demo::Todo => "todo",
            Demo::Form => "form",
            Demo::UserLookup => "github",
            Demo::Dashboard => "dashboard",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::Counter => "count up and down with the arrow keys",
            Demo::Timer => "a start/stop stopwatch",
            Demo::Todo => "a scrollable checklist",
            Demo::Form => "a validated two-field form",
            Demo::UserLookup => "look up a GitHub user over HTTP",
            Demo::Dashboard => "all of the above in one screen",
        }
    }

    /// A fresh instance of the demo.
    pub fn build(self) -> Box<dyn Component> {
        match self {
            Demo::Counter => Box::new(Counter::new()),
            Demo::Timer => Box::new(Timer::new()),
            Demo::Todo => Box::new(TodoList::new()),
            Demo::Form => Box::new(Form::new()),
            Demo::UserLookup => Box::new(UserLookup::new()),
            Demo::Dashboard => Box::new(Dashboard::new()),
        }
    }
}

impl std::fmt::Display for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
