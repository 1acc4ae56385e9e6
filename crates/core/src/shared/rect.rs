/// Axis-aligned rectangle in frame coordinates, edge-exclusive on the
/// right/bottom.
///
/// Coordinates are signed so that a crop computed from a face near the frame
/// edge can be represented (and then rejected) instead of silently clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) as f64 / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) as f64 / 2.0
    }

    /// True when the rectangle is non-empty and lies fully within a
    /// `width` x `height` image.
    pub fn contained_in(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right > self.left
            && self.bottom > self.top
            && self.right <= width as i32
            && self.bottom <= height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let r = Rect::new(10, 20, 30, 60);
        assert_eq!(r.width(), 20);
        assert_eq!(r.height(), 40);
        assert_eq!(r.center_x(), 20.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn test_contained_in_accepts_touching_edges() {
        let r = Rect::new(0, 0, 100, 50);
        assert!(r.contained_in(100, 50));
    }

    #[test]
    fn test_contained_in_rejects_negative_origin() {
        assert!(!Rect::new(-1, 0, 10, 10).contained_in(100, 100));
        assert!(!Rect::new(0, -3, 10, 10).contained_in(100, 100));
    }

    #[test]
    fn test_contained_in_rejects_overflow() {
        assert!(!Rect::new(90, 0, 101, 10).contained_in(100, 100));
        assert!(!Rect::new(0, 95, 10, 101).contained_in(100, 100));
    }

    #[test]
    fn test_contained_in_rejects_empty() {
        assert!(!Rect::new(10, 10, 10, 20).contained_in(100, 100));
        assert!(!Rect::new(10, 10, 20, 10).contained_in(100, 100));
    }
}
