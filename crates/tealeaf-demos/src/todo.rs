//! A checklist with a scrolling viewport.

use crossterm::event::KeyCode;
use ratatui::text::{Line, Text};
use tealeaf_core::{Component, Effect, Event, Theme};
use tealeaf_widgets::key::{help_line, Binding, KeyCombination};

/// Rows the list needs around the items: title, blanks, indicator and help.
pub const TODO_CHROME: u16 = 6;

/// Visible rows before the first resize.
pub const DEFAULT_HEIGHT: usize = 10;

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub title: String,
    pub completed: bool,
}

impl TodoItem {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }
}

fn seed_items() -> Vec<TodoItem> {
    vec![
        TodoItem::new("Learn the component basics", true),
        TodoItem::new("Understand key events", true),
        TodoItem::new("Apply styling", true),
        TodoItem::new("Run work asynchronously", true),
        TodoItem::new("Build a list view", false),
        TodoItem::new("Add text input", false),
        TodoItem::new("Talk to an HTTP API", false),
        TodoItem::new("Compose a multi-panel layout", false),
    ]
}

/// Key bindings for [`TodoList`].
#[derive(Debug, Clone)]
pub struct TodoKeys {
    pub up: Binding,
    pub down: Binding,
    pub toggle: Binding,
    pub quit: Binding,
}

impl Default for TodoKeys {
    fn default() -> Self {
        Self {
            up: Binding::new(
                [KeyCombination::new(KeyCode::Up), KeyCombination::char('k')],
                "↑/k",
                "up",
            ),
            down: Binding::new(
                [KeyCombination::new(KeyCode::Down), KeyCombination::char('j')],
                "↓/j",
                "down",
            ),
            toggle: Binding::new(
                [KeyCombination::new(KeyCode::Enter), KeyCombination::char(' ')],
                "enter/space",
                "toggle",
            ),
            quit: Binding::new(
                [
                    KeyCombination::char('q'),
                    KeyCombination::new(KeyCode::Esc),
                    KeyCombination::ctrl(KeyCode::Char('c')),
                ],
                "q",
                "quit",
            ),
        }
    }
}

/// A fixed list of to-do items with a cursor.
///
/// Only `height` rows are drawn; `offset` is the first visible row and moves
/// just enough to keep the cursor on screen.
#[derive(Debug, Clone)]
pub struct TodoList {
    items: Vec<TodoItem>,
    cursor: usize,
    offset: usize,
    height: usize,
    keys: TodoKeys,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::with_items(seed_items())
    }
}

impl TodoList {
    /// The list seeded with the eight sample items.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            cursor: 0,
            offset: 0,
            height: DEFAULT_HEIGHT,
            keys: TodoKeys::default(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of visible rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.offset = self.offset.min(self.cursor);
        }
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
            if self.cursor >= self.offset + self.height {
                self.offset = self.cursor + 1 - self.height;
            }
        }
    }

    fn toggle(&mut self) {
        if let Some(item) = self.items.get_mut(self.cursor) {
            item.completed = !item.completed;
        }
    }

    fn set_height(&mut self, rows: u16) {
        self.height = usize::from(rows.saturating_sub(TODO_CHROME).max(1));
        // Keep the cursor visible in the smaller viewport.
        if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }
}

impl Component for TodoList {
    fn update(&mut self, event: &Event) -> Effect {
        match event {
            Event::Key(key) if self.keys.up.matches(key) => self.move_up(),
            Event::Key(key) if self.keys.down.matches(key) => self.move_down(),
            Event::Key(key) if self.keys.toggle.matches(key) => self.toggle(),
            Event::Key(key) if self.keys.quit.matches(key) => return Effect::quit(),
            Event::Resize { height, .. } => self.set_height(*height),
            _ => {}
        }
        Effect::none()
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        let mut lines = vec![Line::styled("TODO List", theme.title), Line::default()];

        let end = (self.offset + self.height).min(self.items.len());
        for (i, item) in self.items[self.offset.min(end)..end].iter().enumerate() {
            let index = self.offset + i;
            let checkbox = if item.completed { "[✓]" } else { "[ ]" };
            let line = if index == self.cursor {
                Line::styled(format!("> {} {}", checkbox, item.title), theme.selected)
            } else if item.completed {
                Line::styled(format!("  {} {}", checkbox, item.title), theme.completed)
            } else {
                Line::styled(format!("  {} {}", checkbox, item.title), theme.value)
            };
            lines.push(line);
        }

        if self.items.len() > self.height {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("[{}/{}]", self.cursor + 1, self.items.len()),
                theme.muted,
            ));
        }

        lines.push(Line::default());
        lines.push(help_line(
            [&self.keys.up, &self.keys.down, &self.keys.toggle, &self.keys.quit],
            theme,
        ));
        Text::from(lines)
    }
}
