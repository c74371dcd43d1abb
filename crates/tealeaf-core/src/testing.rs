use crate::component::Component;
use crate::effect::{Effect, FetchRequest};
use crate::event::{Event, FetchCompleted};
use crate::fetch::{FetchError, UserProfile};
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::time::Instant;

/// A headless test harness that drives a [`Component`] without a real terminal.
///
/// `TestProgram` lets you exercise every part of the init/update/view cycle in
/// a plain `#[test]` function -- no tokio runtime or TTY required.  Effects
/// are not executed; they are recorded so a test can assert on them and then
/// resolve them by hand with [`fire_ticks`](TestProgram::fire_ticks) and
/// [`resolve_fetches`](TestProgram::resolve_fetches).
///
/// # Example
///
/// ```rust,ignore
/// use tealeaf_core::testing::TestProgram;
/// use tealeaf_core::Event;
///
/// let mut prog = TestProgram::new(Counter::new());  // calls Counter::init
/// prog.send(Event::key(KeyCode::Up));               // triggers update
/// prog.send(Event::key(KeyCode::Up));
/// assert_eq!(prog.component().count(), 2);          // inspect state
///
/// let output = prog.render_string(40, 5);           // render to string
/// assert!(output.contains("2"));
/// ```
pub struct TestProgram<C: Component> {
    component: C,
    theme: Theme,
    last_effect: Effect,
    pending: Vec<Effect>,
    quit: bool,
}

impl<C: Component> TestProgram<C> {
    /// Create a test program and run [`Component::init`].
    pub fn new(mut component: C) -> Self {
        let init = component.init();
        let mut program = Self {
            component,
            theme: Theme::plain(),
            last_effect: Effect::none(),
            pending: Vec::new(),
            quit: false,
        };
        program.record(init);
        program
    }

    /// Send an event, triggering a single update cycle.
    ///
    /// Returns the effect `update` produced; it also stays available through
    /// [`effect`](TestProgram::effect).
    pub fn send(&mut self, event: Event) -> &Effect {
        let effect = self.component.update(&event);
        self.record(effect);
        &self.last_effect
    }

    /// Send several events in order.
    pub fn send_all(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.send(event);
        }
    }

    /// The effect returned by the most recent `init` or `update`.
    pub fn effect(&self) -> &Effect {
        &self.last_effect
    }

    /// Whether any effect so far asked to quit.
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Tags of scheduled ticks that have not been fired yet.
    pub fn pending_ticks(&self) -> Vec<&'static str> {
        self.pending.iter().flat_map(Effect::ticks).collect()
    }

    /// Fetch requests that have not been resolved yet.
    pub fn pending_fetches(&self) -> Vec<&FetchRequest> {
        self.pending.iter().flat_map(Effect::fetches).collect()
    }

    /// Deliver every pending tick now.
    ///
    /// Ticks scheduled *while* firing are left pending, so a self-renewing
    /// tick chain advances exactly one step per call.  Returns the number of
    /// ticks delivered.
    pub fn fire_ticks(&mut self) -> usize {
        self.fire_ticks_where(|_| true)
    }

    /// Deliver pending ticks carrying `tag`; other ticks stay pending.
    pub fn fire_tick(&mut self, tag: &str) -> usize {
        self.fire_ticks_where(|t| t == tag)
    }

    fn fire_ticks_where(&mut self, mut wanted: impl FnMut(&str) -> bool) -> usize {
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|e| matches!(e, Effect::ScheduleTick { tag, .. } if wanted(tag)));
        self.pending = rest;

        let count = due.len();
        for effect in due {
            if let Effect::ScheduleTick { tag, .. } = effect {
                self.send(Event::Tick {
                    tag,
                    at: Instant::now(),
                });
            }
        }
        count
    }

    /// Complete every pending fetch with the result `respond` returns.
    ///
    /// Returns the number of fetches resolved.
    pub fn resolve_fetches(
        &mut self,
        mut respond: impl FnMut(&FetchRequest) -> Result<UserProfile, FetchError>,
    ) -> usize {
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|e| matches!(e, Effect::FetchUser(_)));
        self.pending = rest;

        let count = due.len();
        for effect in due {
            if let Effect::FetchUser(request) = effect {
                let result = respond(&request);
                self.send(Event::Fetched(FetchCompleted {
                    source: request.source,
                    request_id: request.request_id,
                    result,
                }));
            }
        }
        count
    }

    /// Get a shared reference to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// The component's view with a plain (style-free) theme.
    pub fn view(&self) -> Text<'static> {
        self.component.view(&self.theme)
    }

    /// The view as plain lines, without styling.
    pub fn view_lines(&self) -> Vec<String> {
        self.view()
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    /// Render the component to a ratatui [`Buffer`] of the given dimensions.
    ///
    /// Returns the raw buffer, which you can inspect cell-by-cell.  For a
    /// simpler string-based assertion, see
    /// [`render_string`](TestProgram::render_string).
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = self.view();
        terminal
            .draw(|frame| {
                frame.render_widget(Paragraph::new(view), frame.area());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the component and return the visible content as a plain string.
    ///
    /// Each row of the buffer is concatenated into a line; rows are separated
    /// by newlines.  Trailing whitespace within each row is preserved.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &buf[(x, y)];
                output.push_str(cell.symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn record(&mut self, effect: Effect) {
        for leaf in effect.leaves() {
            match leaf {
                Effect::Quit => self.quit = true,
                Effect::ScheduleTick { .. } | Effect::FetchUser(_) => self.pending.push(leaf.clone()),
                Effect::None | Effect::Batch(_) => {}
            }
        }
        self.last_effect = effect;
    }
}
