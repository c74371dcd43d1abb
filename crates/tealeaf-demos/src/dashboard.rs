//! Four demos tiled in a 2x2 grid with keyboard panel switching.
//!
//! The dashboard owns its children as `Box<dyn Component>` and routes events
//! by hand.  Global keys (Ctrl+C, Tab, Shift+Tab, F1, F2 and the digits 1-4)
//! are consumed here and never reach a panel.  Every other key and pastes go
//! to the active panel only.  Ticks, fetch completions and resizes are
//! broadcast to all four so a timer keeps running while another panel has
//! focus.

use crate::{Counter, Timer, TodoList, UserLookup};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Text};
use tealeaf_core::{Component, Effect, Event, Theme};
use tealeaf_widgets::chrome::{self, BorderKind};
use tealeaf_widgets::key::{Binding, KeyCombination};
use tracing::debug;

/// Number of panels.
pub const PANELS: usize = 4;

/// Terminal size assumed until the first resize.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

const TITLE: &str = "tealeaf dashboard";
const HELP_HINT: &str = "Press F1 for help";
const HELP_SHORT: &str = "Tab:next | Shift+Tab:prev | 1-4:select | F1:help | F2:details | Ctrl+C:quit";
const HELP_DETAILED: &str = "Global keys: Tab/Shift+Tab: switch panel | 1-4: select directly | F1: help | F2: detailed help | Ctrl+C: quit";

/// Which demo a panel hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Counter,
    Timer,
    Todo,
    UserLookup,
}

impl PanelKind {
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Counter => "Counter",
            PanelKind::Timer => "Timer",
            PanelKind::Todo => "TODO",
            PanelKind::UserLookup => "GitHub",
        }
    }
}

/// A dashboard slot: a titled child component.
pub struct Panel {
    title: &'static str,
    kind: PanelKind,
    component: Box<dyn Component>,
    active: bool,
}

impl Panel {
    pub fn new(kind: PanelKind, component: impl Component) -> Self {
        Self {
            title: kind.title(),
            kind,
            component: Box::new(component),
            active: false,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Keys the dashboard handles itself.
#[derive(Debug, Clone)]
pub struct DashboardKeys {
    pub quit: Binding,
    pub next: Binding,
    pub prev: Binding,
    pub help: Binding,
    pub details: Binding,
}

impl Default for DashboardKeys {
    fn default() -> Self {
        Self {
            quit: Binding::new([KeyCombination::ctrl(KeyCode::Char('c'))], "ctrl+c", "quit"),
            next: Binding::new([KeyCombination::new(KeyCode::Tab)], "tab", "next panel"),
            prev: Binding::new([KeyCombination::new(KeyCode::BackTab)], "shift+tab", "previous panel"),
            help: Binding::new([KeyCombination::new(KeyCode::F(1))], "F1", "help"),
            details: Binding::new([KeyCombination::new(KeyCode::F(2))], "F2", "detailed help"),
        }
    }
}

/// Content size of each panel for a terminal of `width` x `height`.
///
/// Each panel gets half the width and half of the height left after the
/// title and help bars, minus its border.
pub fn panel_size(width: u16, height: u16) -> (u16, u16) {
    let inner_width = (width / 2).saturating_sub(2);
    let inner_height = (height.saturating_sub(4) / 2).saturating_sub(2);
    (inner_width, inner_height)
}

/// Counter, Timer, TODO list and user lookup in one screen.
#[derive(Debug)]
pub struct Dashboard {
    panels: [Panel; PANELS],
    active: usize,
    width: u16,
    height: u16,
    show_help: bool,
    detailed_help: bool,
    keys: DashboardKeys,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_panels([
            Panel::new(PanelKind::Counter, Counter::new()),
            Panel::new(PanelKind::Timer, Timer::new()),
            Panel::new(PanelKind::Todo, TodoList::new()),
            Panel::new(PanelKind::UserLookup, UserLookup::new()),
        ])
    }

    /// A dashboard over custom panels.  The first panel starts active.
    pub fn with_panels(mut panels: [Panel; PANELS]) -> Self {
        for (i, panel) in panels.iter_mut().enumerate() {
            panel.active = i == 0;
        }
        Self {
            panels,
            active: 0,
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            show_help: true,
            detailed_help: false,
            keys: DashboardKeys::default(),
        }
    }

    /// Index of the active panel.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn panels(&self) -> &[Panel; PANELS] {
        &self.panels
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn detailed_help(&self) -> bool {
        self.detailed_help
    }

    /// Last recorded terminal size.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn select(&mut self, index: usize) {
        self.panels[self.active].active = false;
        self.active = index % PANELS;
        self.panels[self.active].active = true;
        debug!(panel = self.panels[self.active].title, "Switched panel");
    }

    /// Handle a global key.  Returns `None` if the key belongs to a panel.
    fn global_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        if self.keys.quit.matches(key) {
            return Some(Effect::quit());
        }
        if self.keys.next.matches(key) {
            self.select(self.active + 1);
        } else if self.keys.prev.matches(key) {
            self.select(self.active + PANELS - 1);
        } else if self.keys.help.matches(key) {
            self.show_help = !self.show_help;
        } else if self.keys.details.matches(key) {
            self.detailed_help = !self.detailed_help;
        } else {
            match (key.code, key.modifiers.difference(KeyModifiers::SHIFT)) {
                (KeyCode::Char(c @ '1'..='4'), KeyModifiers::NONE) => {
                    self.select(usize::from(c as u8 - b'1'));
                }
                _ => return None,
            }
        }
        Some(Effect::none())
    }

    fn broadcast(&mut self, event: &Event) -> Effect {
        Effect::batch(
            self.panels
                .iter_mut()
                .map(|panel| panel.component.update(event)),
        )
    }

    fn help_text(&self) -> &'static str {
        match (self.show_help, self.detailed_help) {
            (false, _) => HELP_HINT,
            (true, false) => HELP_SHORT,
            (true, true) => HELP_DETAILED,
        }
    }

    fn panel_lines(&self, index: usize, theme: &Theme) -> Vec<Line<'static>> {
        let panel = &self.panels[index];
        let (inner_width, inner_height) = panel_size(self.width, self.height);
        let mut title = format!("[{}] {}", index + 1, panel.title);
        let (kind, border) = if panel.active {
            title.push_str(" ★");
            (BorderKind::Thick, theme.active_border)
        } else {
            (BorderKind::Rounded, theme.inactive_border)
        };
        chrome::panel(
            panel.component.view(theme),
            &title,
            kind,
            border,
            usize::from(inner_width),
            usize::from(inner_height),
        )
    }
}

impl Component for Dashboard {
    fn init(&mut self) -> Effect {
        Effect::batch(self.panels.iter_mut().map(|panel| panel.component.init()))
    }

    fn update(&mut self, event: &Event) -> Effect {
        match event {
            Event::Key(key) => match self.global_key(key) {
                Some(effect) => effect,
                None => self.panels[self.active].component.update(event),
            },
            _ if event.is_input() => self.panels[self.active].component.update(event),
            Event::Resize { width, height } => {
                self.width = *width;
                self.height = *height;
                let (inner_width, inner_height) = panel_size(*width, *height);
                self.broadcast(&Event::resize(inner_width, inner_height))
            }
            _ => self.broadcast(event),
        }
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        let width = usize::from(self.width);
        let mut lines = Vec::new();

        lines.push(chrome::fit_line(Line::raw(format!(" {}", TITLE)), width).style(theme.header_bar));
        for row in [[0, 1], [2, 3]] {
            lines.extend(chrome::join_horizontal(
                self.panel_lines(row[0], theme),
                self.panel_lines(row[1], theme),
            ));
        }
        lines.push(
            chrome::fit_line(Line::raw(format!(" {}", self.help_text())), width)
                .style(theme.header_bar),
        );
        Text::from(lines)
    }
}
