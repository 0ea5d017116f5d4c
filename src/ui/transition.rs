//! Directional slide between the previous and the new active screen.

use std::rc::Rc;

use crate::screens::{Screen, ScreenStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// New screen enters from the right.
    Forward,
    /// New screen enters from the left.
    Backward,
}

/// Direction of the change from `previous` to `next`, or `None` when the
/// active entry is the same instance.
pub fn direction_between(previous: &ScreenStack, next: &ScreenStack) -> Option<SlideDirection> {
    if Rc::ptr_eq(&previous.active.instance, &next.active.instance) {
        return None;
    }
    if previous.contains_in_back_stack(&next.active.instance) {
        Some(SlideDirection::Backward)
    } else {
        Some(SlideDirection::Forward)
    }
}

#[derive(Debug, Clone)]
pub struct SlideTransition {
    direction: SlideDirection,
    outgoing: Rc<Screen>,
    frame: u16,
    frames: u16,
}

impl SlideTransition {
    pub fn new(direction: SlideDirection, outgoing: Rc<Screen>, frames: u16) -> Self {
        Self {
            direction,
            outgoing,
            frame: 0,
            frames: frames.max(1),
        }
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Screen that is leaving. Kept alive here after it was popped.
    pub fn outgoing(&self) -> &Rc<Screen> {
        &self.outgoing
    }

    /// 0.0 at start, 1.0 when finished.
    pub fn progress(&self) -> f32 {
        f32::from(self.frame) / f32::from(self.frames)
    }

    /// Step one frame. Returns true once finished.
    pub fn advance(&mut self) -> bool {
        self.frame = (self.frame + 1).min(self.frames);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.frames
    }

    /// Horizontal offsets `(incoming, outgoing)` in cells for a body of
    /// `width` columns.
    pub fn offsets(&self, width: u16) -> (i32, i32) {
        let width = i32::from(width);
        let travelled = (width as f32 * self.progress()).round() as i32;
        let remaining = width - travelled;
        match self.direction {
            SlideDirection::Forward => (remaining, -travelled),
            SlideDirection::Backward => (-remaining, travelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ComponentContext;
    use crate::screens::screen_b::ScreenBController;

    fn screen() -> Rc<Screen> {
        Rc::new(Screen::ScreenB(ScreenBController::new(
            "x",
            ComponentContext::root(None),
            || {},
        )))
    }

    #[test]
    fn forward_slides_incoming_from_the_right() {
        let mut t = SlideTransition::new(SlideDirection::Forward, screen(), 4);
        assert_eq!(t.offsets(80), (80, 0));
        t.advance();
        assert_eq!(t.offsets(80), (60, -20));
        t.advance();
        t.advance();
        assert!(t.advance());
        assert_eq!(t.offsets(80), (0, -80));
    }

    #[test]
    fn backward_mirrors_forward() {
        let mut t = SlideTransition::new(SlideDirection::Backward, screen(), 2);
        assert_eq!(t.offsets(10), (-10, 0));
        t.advance();
        assert_eq!(t.offsets(10), (-5, 5));
    }

    #[test]
    fn zero_frames_is_clamped_to_one() {
        let mut t = SlideTransition::new(SlideDirection::Forward, screen(), 0);
        assert!(!t.is_finished());
        assert!(t.advance());
    }
}
