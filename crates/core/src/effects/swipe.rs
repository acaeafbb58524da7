/// Vertical swipe direction, named after the finger's movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Up,
    Down,
}

/// Tracks the vertical start of the current touch.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_y: f64,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, screen_y: f64) {
        self.start_y = screen_y;
    }

    /// A swipe only counts when it travelled strictly more than `threshold`.
    pub fn end(&self, screen_y: f64, threshold: f64) -> Option<Swipe> {
        let diff = self.start_y - screen_y;
        if diff.abs() <= threshold {
            return None;
        }
        Some(if diff > 0.0 { Swipe::Up } else { Swipe::Down })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_moves_are_not_swipes() {
        let mut tracker = SwipeTracker::new();
        tracker.start(400.0);
        assert_eq!(tracker.end(360.0, 50.0), None);
        assert_eq!(tracker.end(350.0, 50.0), None);
    }

    #[test]
    fn direction_follows_finger() {
        let mut tracker = SwipeTracker::new();
        tracker.start(400.0);
        assert_eq!(tracker.end(300.0, 50.0), Some(Swipe::Up));
        assert_eq!(tracker.end(520.0, 50.0), Some(Swipe::Down));
    }
}
