use crate::component::Component;
use crate::effect::{Effect, FetchRequest};
use crate::event::{Event, FetchCompleted};
use crate::fetch::{FetchConfig, FetchError, Fetcher, HttpFetcher};
use crate::input::spawn_terminal_reader;
use crate::theme::Theme;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The user fetcher could not be built from [`ProgramOptions::fetch`].
    #[error("fetcher setup failed: {0}")]
    Fetcher(#[from] FetchError),
}

/// Configuration options for a [`Program`].
///
/// All fields have sensible defaults (see [`Default`] impl).  Use struct
/// update syntax to override only the options you need:
///
/// # Example
///
/// ```rust,ignore
/// use tealeaf_core::{FetchConfig, ProgramOptions};
///
/// let opts = ProgramOptions {
///     fps: 30,
///     alt_screen: false,
///     fetch: FetchConfig::with_base_url("http://localhost:8080"),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to catch panics and restore terminal (default: true).
    pub catch_panics: bool,
    /// Whether to quit on SIGINT (default: true).
    pub handle_signals: bool,
    /// Settings for the HTTP user fetcher.
    pub fetch: FetchConfig,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            fetch: FetchConfig::default(),
        }
    }
}

/// The program runtime.  Manages terminal setup, the event loop, and effect
/// execution for a root [`Component`].
///
/// `Program` converts terminal input into [`Event`]s, calls
/// [`Component::update`], executes the returned [`Effect`]s on tokio tasks and
/// feeds their completions back as events.  It redraws at most once per frame
/// and only when an event was processed since the last draw.
///
/// # Example
///
/// ```rust,ignore
/// use tealeaf_core::{Program, ProgramError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let counter = Program::new(Counter::new())?.run().await?;
///     // `counter` is the final state after quit
///     Ok(())
/// }
/// ```
pub struct Program<C: Component> {
    component: C,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    fetcher: Arc<dyn Fetcher>,
    theme: Theme,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<C: Component> Program<C> {
    /// Create a new program with default options.
    ///
    /// Returns an error if terminal initialization fails.
    pub fn new(component: C) -> Result<Self, ProgramError> {
        Self::with_options(component, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// Returns an error if the fetcher configuration is invalid or terminal
    /// initialization fails.
    pub fn with_options(component: C, options: ProgramOptions) -> Result<Self, ProgramError> {
        let fetcher = HttpFetcher::new(&options.fetch)?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let terminal = init_terminal(&options)?;

        Ok(Self {
            component,
            terminal,
            event_tx,
            event_rx,
            fetcher: Arc::new(fetcher),
            theme: Theme::default(),
            options,
            needs_redraw: true,
            should_quit: false,
        })
    }

    /// Run the program. Blocks until quit.
    ///
    /// The terminal is restored whether the loop ends cleanly or with an
    /// error.  Returns the component in its final state.
    pub async fn run(mut self) -> Result<C, ProgramError> {
        info!(fps = self.options.fps, "Program started");

        let init = self.component.init();
        self.execute(init);

        let reader = spawn_terminal_reader(self.event_tx.clone());
        let result = self.event_loop().await;

        reader.abort();
        restore_terminal(&self.options)?;
        result?;

        info!("Program stopped");
        Ok(self.component)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        // Components learn their size from an initial resize.
        let (width, height) = crossterm::terminal::size()?;
        self.process_event(Event::resize(width, height));
        if self.should_quit {
            return Ok(());
        }

        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval =
            tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    debug!("Received ctrl+c signal");
                    return Ok(());
                }

                Some(event) = self.event_rx.recv() => {
                    self.process_event(event);

                    // Micro-batch: drain additional events within 100us, up to 100 events
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut batch_count = 0u32;
                    while !self.should_quit && Instant::now() < deadline && batch_count < 100 {
                        match self.event_rx.try_recv() {
                            Ok(event) => {
                                self.process_event(event);
                                batch_count += 1;
                            }
                            Err(_) => break,
                        }
                    }

                    if self.should_quit {
                        return Ok(());
                    }
                }

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn process_event(&mut self, event: Event) {
        trace!(?event, "Dispatching event");
        let effect = self.component.update(&event);
        self.execute(effect);
        self.needs_redraw = true;
    }

    fn execute(&mut self, effect: Effect) {
        for effect in effect.into_leaves() {
            match effect {
                Effect::None | Effect::Batch(_) => {}
                Effect::Quit => {
                    debug!("Quit requested");
                    self.should_quit = true;
                }
                Effect::ScheduleTick { delay, tag } => {
                    trace!(tag, ?delay, "Scheduling tick");
                    let tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Event::Tick {
                            tag,
                            at: Instant::now(),
                        });
                    });
                }
                Effect::FetchUser(request) => self.spawn_fetch(request),
            }
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        debug!(
            source = request.source,
            request_id = request.request_id,
            login = %request.login,
            "Starting user fetch"
        );
        let fetch = self.fetcher.fetch_user(&request.login);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            let _ = tx.send(Event::Fetched(FetchCompleted {
                source: request.source,
                request_id: request.request_id,
                result,
            }));
        });
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        let view = self.component.view(&self.theme);
        self.terminal.draw(|frame| {
            frame.render_widget(Paragraph::new(view), frame.area());
        })?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Install panic hook that restores terminal (only once to avoid stacking)
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let backend = CrosstermBackend::new(writer);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool) -> Result<(), std::io::Error> {
    // Best-effort: keep restoring even if individual steps fail.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
