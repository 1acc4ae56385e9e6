use crate::imaging::color::to_luma;
use crate::imaging::stats::{mean, mean_stddev};
use crate::shared::frame::Frame;

/// Heuristic lighting-evenness check on a face crop.
///
/// The luma plane is binarized at an adaptive cutoff of `mean - stddev / 3`
/// (dark pixels — hair, brows, nostrils — fall below it), then the mask
/// means of the left and right halves are compared. A half's mask mean is
/// its bright-pixel fraction scaled to 255, so a shadow registers whether
/// it dims pixels below the cutoff or thins them out entirely. A difference
/// above `epsilon` means one side of the face sits in shadow. Returns
/// `None` only for a degenerate crop.
pub fn is_evenly_lightened(face: &Frame, epsilon: f64) -> Option<bool> {
    if face.width() < 2 || face.height() == 0 {
        return None;
    }
    let luma = to_luma(face);
    let (luma_mean, stddev) = mean_stddev(&luma);
    let cutoff = luma_mean - stddev / 3.0;

    let w = face.width() as usize;
    let half = w / 2;
    let mut masks = [Vec::new(), Vec::new()];
    for (i, &v) in luma.iter().enumerate() {
        let side = usize::from(i % w >= half);
        masks[side].push(if (v as f64) > cutoff { 255 } else { 0 });
    }
    let left = mean(&masks[0]);
    let right = mean(&masks[1]);
    Some((left - right).abs() < epsilon)
}
