use crate::shared::frame::Frame;

/// Normalized brightness of an RGB color in [0, 1].
///
/// Uses the 0.3/0.59/0.11 illumination weights rather than a plain average;
/// 1 is white, 0 is black.
pub fn brightness(rgb: [f64; 3]) -> f64 {
    (rgb[0] * 0.3 + rgb[1] * 0.59 + rgb[2] * 0.11) / 255.0
}

/// Single-channel grayscale plane (Rec. 601 weights), one byte per pixel.
pub fn to_gray(frame: &Frame) -> Vec<u8> {
    let mut gray = Vec::with_capacity((frame.width() * frame.height()) as usize);
    for chunk in frame.data().chunks_exact(frame.channels() as usize) {
        let y = 0.299 * chunk[0] as f64 + 0.587 * chunk[1] as f64 + 0.114 * chunk[2] as f64;
        gray.push(y.round().clamp(0.0, 255.0) as u8);
    }
    gray
}

/// Luma (Y of YCbCr) plane. Identical weights to [`to_gray`]; named
/// separately because lighting analysis reasons about luma, not grayscale.
pub fn to_luma(frame: &Frame) -> Vec<u8> {
    to_gray(frame)
}

/// One RGB pixel to full-range HSV (all three channels scaled to 0-255,
/// hue included — the "FULL" convention, not the 0-180 one).
pub fn rgb_to_hsv_full(rgb: [u8; 3]) -> [u8; 3] {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue_deg = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    [
        (hue_deg / 360.0 * 255.0).round().clamp(0.0, 255.0) as u8,
        (saturation * 255.0).round().clamp(0.0, 255.0) as u8,
        (max * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Full-range HSV plane of an RGB frame, interleaved like the input.
pub fn to_hsv_full(frame: &Frame) -> Vec<u8> {
    let mut hsv = Vec::with_capacity(frame.data().len());
    for chunk in frame.data().chunks_exact(frame.channels() as usize) {
        let converted = rgb_to_hsv_full([chunk[0], chunk[1], chunk[2]]);
        hsv.extend_from_slice(&converted);
    }
    hsv
}

/// Add a constant to every channel, saturating at 255 (brightening).
pub fn brighten_in_place(frame: &mut Frame, amount: u8) {
    for value in frame.data_mut() {
        *value = value.saturating_add(amount);
    }
}
