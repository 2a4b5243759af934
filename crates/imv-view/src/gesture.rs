//! Drag-to-pan pointer tracking.
//!
//! A pan starts on a primary-button press, produces one screen-space delta
//! per move, and ends on release of the same button. Other buttons are
//! ignored.

use glam::Vec2;
use tracing::trace;

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left / primary button.
    #[default]
    Primary,
    /// Right / secondary button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Pan gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanGesture {
    last: Option<Vec2>,
}

impl PanGesture {
    /// Idle gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a pan at `pos` if `button` is primary. Returns whether a pan
    /// started.
    pub fn press(&mut self, button: PointerButton, pos: Vec2) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        trace!(x = pos.x, y = pos.y, "pan start");
        self.last = Some(pos);
        true
    }

    /// Pointer moved to `pos`. Returns the delta since the last position
    /// while panning, `None` otherwise.
    pub fn drag(&mut self, pos: Vec2) -> Option<Vec2> {
        let last = self.last.as_mut()?;
        let delta = pos - *last;
        *last = pos;
        Some(delta)
    }

    /// Ends the pan if `button` is primary.
    pub fn release(&mut self, button: PointerButton) {
        if button == PointerButton::Primary && self.last.take().is_some() {
            trace!("pan end");
        }
    }

    /// Drops any pan in progress.
    pub fn cancel(&mut self) {
        self.last = None;
    }

    /// `true` between a primary press and its release.
    #[inline]
    pub fn is_panning(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut g = PanGesture::new();
        assert!(g.press(PointerButton::Primary, Vec2::new(10.0, 10.0)));
        assert_eq!(g.drag(Vec2::new(15.0, 8.0)), Some(Vec2::new(5.0, -2.0)));
        assert_eq!(g.drag(Vec2::new(15.0, 20.0)), Some(Vec2::new(0.0, 12.0)));
        g.release(PointerButton::Primary);
        assert!(!g.is_panning());
        assert_eq!(g.drag(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn non_primary_buttons_are_ignored() {
        let mut g = PanGesture::new();
        assert!(!g.press(PointerButton::Secondary, Vec2::ZERO));
        assert!(!g.is_panning());
        assert_eq!(g.drag(Vec2::ONE), None);

        g.press(PointerButton::Primary, Vec2::ZERO);
        g.release(PointerButton::Middle);
        assert!(g.is_panning());
    }

    #[test]
    fn cancel_stops_pan() {
        let mut g = PanGesture::new();
        g.press(PointerButton::Primary, Vec2::ZERO);
        g.cancel();
        assert!(!g.is_panning());
    }
}
