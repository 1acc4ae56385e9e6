use crate::imaging::color::brightness;
use crate::shared::frame::Frame;

/// Which upper corner region to sample a background pixel from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Margin from the frame border for the candidate coordinates.
const EDGE_INSET: u32 = 10;

/// Locate a probable background pixel near the given upper corner.
///
/// The input is a background composite where the person is painted black,
/// so any non-black pixel at a likely-background coordinate qualifies.
/// Scans a short fixed candidate list for speed; `None` means this frame's
/// uniformity check must abstain, not fail.
pub fn find_background_pixel(composite: &Frame, side: Side) -> Option<(u32, u32)> {
    let w = composite.width();
    if w <= 2 * EDGE_INSET || composite.height() <= 2 * EDGE_INSET {
        return None;
    }
    let candidates = match side {
        Side::Left => [(EDGE_INSET, EDGE_INSET), (w / 4, EDGE_INSET)],
        Side::Right => [(w - EDGE_INSET, EDGE_INSET), (w / 4 * 3, EDGE_INSET)],
    };
    find_pixel(composite, &candidates, false)
}

/// Locate a probable person pixel (black under the mask) near the
/// lower center of the composite.
pub fn find_person_pixel(composite: &Frame) -> Option<(u32, u32)> {
    let w = composite.width();
    let h = composite.height();
    if w <= 2 * EDGE_INSET || h <= 2 * EDGE_INSET {
        return None;
    }
    let candidates = [(w / 2, h - EDGE_INSET), (w / 2, h / 2), (w / 2, h * 3 / 4)];
    find_pixel(composite, &candidates, true)
}

fn find_pixel(frame: &Frame, candidates: &[(u32, u32)], want_black: bool) -> Option<(u32, u32)> {
    for &(x, y) in candidates {
        let x = x.min(frame.width() - 1);
        let y = y.min(frame.height() - 1);
        let [r, g, b] = frame.pixel(x, y);
        let is_black = brightness([r as f64, g as f64, b as f64]) == 0.0;
        if is_black == want_black {
            return Some((x, y));
        }
    }
    None
}
