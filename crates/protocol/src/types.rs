use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in CSS pixels, as reported by
/// `getBoundingClientRect()` or by offset measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Position of this rect's top-left corner relative to `origin`'s.
    pub fn offset_from(&self, origin: &Rect) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_relative_to_origin() {
        let nav = Rect::new(100.0, 10.0, 500.0, 48.0);
        let link = Rect::new(220.0, 18.0, 80.0, 32.0);
        assert_eq!(link.offset_from(&nav), Point::new(120.0, 8.0));
    }
}
