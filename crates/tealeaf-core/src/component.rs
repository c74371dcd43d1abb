use crate::effect::Effect;
use crate::event::Event;
use crate::theme::Theme;
use ratatui::text::Text;

/// An interactive state machine driven by [`Event`]s.
///
/// Every demo app, and the dashboard that hosts four of them, implements this
/// one contract:
///
/// 1. **init** -- [`init`](Component::init) runs once before the first event
///    and may return an [`Effect`] (a cursor blink, an initial tick).
/// 2. **update** -- [`update`](Component::update) receives an event, mutates
///    the component's own state, and *describes* any deferred work as an
///    [`Effect`].  It never performs I/O or sleeps.
/// 3. **view** -- [`view`](Component::view) renders the current state to a
///    block of text.  It is a pure function of state and the [`Theme`].
///
/// Because `view` returns [`Text`] rather than drawing into a frame, a parent
/// can post-process a child's output: the dashboard clips each panel to its
/// rectangle before wrapping it in a border.
///
/// # Composition pattern
///
/// Components are object safe, so a parent can hold heterogeneous children as
/// `Box<dyn Component>` and forward events by hand:
///
/// ```rust,ignore
/// use tealeaf_core::{Component, Effect, Event, Theme};
/// use ratatui::text::Text;
///
/// struct Split { left: Box<dyn Component>, right: Box<dyn Component> }
///
/// impl Component for Split {
///     fn init(&mut self) -> Effect {
///         Effect::batch([self.left.init(), self.right.init()])
///     }
///
///     fn update(&mut self, event: &Event) -> Effect {
///         // Keys go left, everything else to both.
///         match event {
///             Event::Key(_) => self.left.update(event),
///             _ => Effect::batch([self.left.update(event), self.right.update(event)]),
///         }
///     }
///
///     fn view(&self, theme: &Theme) -> Text<'static> {
///         let mut text = self.left.view(theme);
///         text.extend(self.right.view(theme));
///         text
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// Effect to run before the first event.
    ///
    /// The default implementation returns [`Effect::None`].
    fn init(&mut self) -> Effect {
        Effect::none()
    }

    /// Process an event, mutate state, and return an [`Effect`] for deferred work.
    ///
    /// Ticks and fetch completions are delivered to every component in a
    /// tree; implementations should check the tag or source and return
    /// [`Effect::None`] for events that are not theirs.
    fn update(&mut self, event: &Event) -> Effect;

    /// Render the current state.
    ///
    /// The returned text is unbounded; the caller decides how to fit it.
    fn view(&self, theme: &Theme) -> Text<'static>;
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn init(&mut self) -> Effect {
        (**self).init()
    }

    fn update(&mut self, event: &Event) -> Effect {
        (**self).update(event)
    }

    fn view(&self, theme: &Theme) -> Text<'static> {
        (**self).view(theme)
    }
}
