use ratatui::style::{Color, Modifier, Style};

/// Styles shared by every component's [`view`](crate::Component::view).
///
/// A `Theme` is a plain value owned by the [`Program`](crate::Program) and
/// passed down by reference; there is no global style registry.  Components
/// pick the role that fits (`title`, `muted`, `error`, ...) rather than
/// hard-coding colors, so a parent can restyle its children wholesale.
///
/// ```rust,ignore
/// let theme = Theme {
///     accent: Style::new().fg(Color::Magenta),
///     ..Theme::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Headings inside a component.
    pub title: Style,
    /// Emphasized values (the counter, the elapsed time).
    pub accent: Style,
    /// De-emphasized text such as placeholders.
    pub muted: Style,
    /// Key hints.
    pub help: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    /// Form labels and profile field names.
    pub label: Style,
    /// Form values and profile field values.
    pub value: Style,
    /// The row under a list cursor.
    pub selected: Style,
    /// Completed to-do items.
    pub completed: Style,
    /// Border of the focused panel.
    pub active_border: Style,
    /// Border of every other panel.
    pub inactive_border: Style,
    /// Dashboard title and help bars.
    pub header_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            accent: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            muted: Style::new().fg(Color::DarkGray),
            help: Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            success: Style::new().fg(Color::Green),
            error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            warning: Style::new().fg(Color::Yellow),
            label: Style::new().fg(Color::Gray),
            value: Style::new().fg(Color::Cyan),
            selected: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            completed: Style::new()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            active_border: Style::new().fg(Color::Cyan),
            inactive_border: Style::new().fg(Color::DarkGray),
            header_bar: Style::new()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// A theme with every style empty, for output without color.
    pub fn plain() -> Self {
        let plain = Style::new();
        Self {
            title: plain,
            accent: plain,
            muted: plain,
            help: plain,
            success: plain,
            error: plain,
            warning: plain,
            label: plain,
            value: plain,
            selected: plain,
            completed: plain,
            active_border: plain,
            inactive_border: plain,
            header_bar: plain,
        }
    }
}
