use std::time::Duration;

/// A side effect returned from [`Component::init`](crate::Component::init) or
/// [`Component::update`](crate::Component::update).
///
/// Effects are plain values: a component only *describes* the work it wants
/// done and the [`Program`](crate::Program) executes it after `update`
/// returns.  Every effect resolves into at most one future [`Event`]:
///
/// | Effect | Resolves to |
/// |--------|-------------|
/// | [`None`](Effect::None) | nothing |
/// | [`Quit`](Effect::Quit) | ends the event loop |
/// | [`ScheduleTick`](Effect::ScheduleTick) | [`Event::Tick`] with the same tag after `delay` |
/// | [`FetchUser`](Effect::FetchUser) | exactly one [`Event::Fetched`] |
/// | [`Batch`](Effect::Batch) | each member independently, in no particular order |
///
/// # Examples
///
/// ```rust,ignore
/// // Do nothing:
/// let effect = Effect::none();
///
/// // Wake up in 100ms:
/// let effect = Effect::tick(Duration::from_millis(100), "timer");
///
/// // Quit the program:
/// let effect = Effect::quit();
/// ```
///
/// [`Event`]: crate::Event
/// [`Event::Tick`]: crate::Event::Tick
/// [`Event::Fetched`]: crate::Event::Fetched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Effect {
    /// No-op.
    #[default]
    None,
    /// Quit the program.
    Quit,
    /// Deliver an [`Event::Tick`](crate::Event::Tick) carrying `tag` after `delay`.
    ScheduleTick { delay: Duration, tag: &'static str },
    /// Look up a user profile over HTTP.
    FetchUser(FetchRequest),
    /// Run several effects concurrently.
    Batch(Vec<Effect>),
}

/// Parameters of a user lookup.
///
/// `source` and `request_id` are echoed back in the
/// [`FetchCompleted`](crate::event::FetchCompleted) event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub source: &'static str,
    pub request_id: u64,
    pub login: String,
}

impl Effect {
    /// No-op effect.
    pub fn none() -> Self {
        Effect::None
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Effect::Quit
    }

    /// One-shot tick after `delay`, tagged so only its owner reacts to it.
    pub fn tick(delay: Duration, tag: &'static str) -> Self {
        Effect::ScheduleTick { delay, tag }
    }

    /// Fetch the profile for `login` on behalf of `source`.
    pub fn fetch_user(source: &'static str, request_id: u64, login: impl Into<String>) -> Self {
        Effect::FetchUser(FetchRequest {
            source,
            request_id,
            login: login.into(),
        })
    }

    /// Run multiple effects concurrently.
    ///
    /// `None` members are dropped; an empty batch collapses to
    /// [`Effect::None`] and a single-member batch to that member.
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        let mut effects: Vec<_> = effects.into_iter().filter(|e| !e.is_none()).collect();
        match effects.len() {
            0 => Effect::None,
            1 => effects.pop().unwrap_or_default(),
            _ => Effect::Batch(effects),
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op effect.
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Returns `true` if this effect, or any member of a batch, quits.
    pub fn is_quit(&self) -> bool {
        self.leaves().iter().any(|e| matches!(e, Effect::Quit))
    }

    /// Tags of every tick this effect schedules.
    pub fn ticks(&self) -> Vec<&'static str> {
        self.leaves()
            .into_iter()
            .filter_map(|e| match e {
                Effect::ScheduleTick { tag, .. } => Some(*tag),
                _ => None,
            })
            .collect()
    }

    /// Every fetch this effect requests.
    pub fn fetches(&self) -> Vec<&FetchRequest> {
        self.leaves()
            .into_iter()
            .filter_map(|e| match e {
                Effect::FetchUser(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Flatten nested batches into their non-batch members.
    pub fn leaves(&self) -> Vec<&Effect> {
        match self {
            Effect::None => vec![],
            Effect::Batch(effects) => effects.iter().flat_map(Effect::leaves).collect(),
            other => vec![other],
        }
    }

    /// Owned counterpart of [`leaves`](Effect::leaves).
    pub fn into_leaves(self) -> Vec<Effect> {
        match self {
            Effect::None => vec![],
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::into_leaves).collect(),
            other => vec![other],
        }
    }
}
