use crate::shared::config::AnalyzerConfig;
use crate::shared::constants::H_TO_W_RATIO;
use crate::shared::face_observation::FaceObservation;
use crate::shared::rect::Rect;

/// Side of the face-only crop relative to the expanded box width.
/// Chosen to cover eyes to chin while staying clear of hair and background.
const FACE_ONLY_SCALE: f64 = 0.57;
/// Upward shift of the face-only crop as a fraction of its side.
const FACE_ONLY_TOP_OFFSET: f64 = 0.2;

/// Standardized passport crop rectangle for a detected face.
///
/// The box is centered horizontally on the face, widened by the configured
/// expansion factor, and framed at 35:45 with `crop_upper_fraction` of the
/// height above the face center — passport convention keeps more headroom
/// above than chin room below.
///
/// Fails fast: any edge outside the source image returns `None` rather than
/// clamping, because a clamped crop would break the fixed aspect ratio.
pub fn passport_crop(
    face: &FaceObservation,
    config: &AnalyzerConfig,
    frame_width: u32,
    frame_height: u32,
) -> Option<Rect> {
    let center_x = face.bounding_box.center_x();
    let center_y = face.bounding_box.center_y();
    let width = face.bounding_box.width() as f64 * config.crop_expansion_factor;
    let height = width * H_TO_W_RATIO;

    let rect = Rect::new(
        (center_x - width / 2.0) as i32,
        (center_y - height * config.crop_upper_fraction) as i32,
        (center_x + width / 2.0) as i32,
        (center_y + height * (1.0 - config.crop_upper_fraction)) as i32,
    );

    if rect.contained_in(frame_width, frame_height) {
        Some(rect)
    } else {
        log::warn!(
            "passport crop {rect:?} exceeds {frame_width}x{frame_height} source; skipping"
        );
        None
    }
}

/// Tight square crop containing the face only — no hairline, no background.
///
/// Used by the shadow and visibility analyzers, which reason about skin
/// luminance and must not be confused by hair or backdrop.
pub fn face_only_crop(
    face: &FaceObservation,
    config: &AnalyzerConfig,
    frame_width: u32,
    frame_height: u32,
) -> Option<Rect> {
    let center_x = face.bounding_box.center_x();
    let center_y = face.bounding_box.center_y();
    let side = face.bounding_box.width() as f64 * config.crop_expansion_factor * FACE_ONLY_SCALE;

    let left = center_x - side / 2.0;
    let top = center_y - side * FACE_ONLY_TOP_OFFSET;
    let rect = Rect::new(
        left as i32,
        top as i32,
        (left + side) as i32,
        (top + side) as i32,
    );

    if rect.contained_in(frame_width, frame_height) {
        Some(rect)
    } else {
        log::warn!("face-only crop {rect:?} exceeds {frame_width}x{frame_height} source; skipping");
        None
    }
}
