//! Circular focus over a fixed number of stops.

/// Tracks which of `N` focusable stops has focus.  Moving past either end
/// wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRing<const N: usize> {
    focused: usize,
}

impl<const N: usize> FocusRing<N> {
    /// Create a new ring with focus on the first stop (index 0).
    pub fn new() -> Self {
        Self { focused: 0 }
    }

    /// Return the index of the currently focused stop.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Move focus to the next stop, wrapping around after the last.
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % N;
    }

    /// Move focus to the previous stop, wrapping around before the first.
    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + N - 1) % N;
    }

    /// Set focus to the given stop, clamped to the valid range.
    pub fn focus(&mut self, index: usize) {
        self.focused = index.min(N - 1);
    }

    /// Return whether the stop at the given index currently has focus.
    pub fn is_focused(&self, index: usize) -> bool {
        self.focused == index
    }
}

impl<const N: usize> Default for FocusRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let ring = FocusRing::<3>::new();
        assert_eq!(ring.focused(), 0);
        assert!(ring.is_focused(0));
    }

    #[test]
    fn n_steps_forward_return_to_start() {
        let mut ring = FocusRing::<4>::new();
        ring.focus(2);
        for _ in 0..8 {
            ring.focus_next();
        }
        assert_eq!(ring.focused(), 2);
    }

    #[test]
    fn focus_prev_wraps() {
        let mut ring = FocusRing::<3>::new();
        ring.focus_prev();
        assert_eq!(ring.focused(), 2);
        ring.focus_next();
        assert_eq!(ring.focused(), 0);
    }

    #[test]
    fn focus_clamps() {
        let mut ring = FocusRing::<3>::new();
        ring.focus(10);
        assert_eq!(ring.focused(), 2);
    }
}
