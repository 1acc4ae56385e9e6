use crate::imaging::resize::resize_plane;
use crate::shared::frame::Frame;

/// Probability above which a pixel is treated as certainly-person when
/// sharpening the person-hiding mask.
pub const PERSON_TRUNCATE_THRESHOLD: f32 = 0.9;

/// Fixed-resolution single-channel person-probability grid from the
/// segmentation network: 1.0 = person, 0.0 = background.
///
/// Recomputed fully on every analysis call; never cached across frames.
#[derive(Clone, Debug)]
pub struct SegmentationMask {
    data: Vec<f32>,
    size: u32,
}

impl SegmentationMask {
    pub fn new(data: Vec<f32>, size: u32) -> Self {
        debug_assert_eq!(data.len(), (size * size) as usize);
        Self { data, size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Plane that blacks out the person when multiplied with the image:
    /// `1 - p`, sharpened with a truncating threshold so that only
    /// near-certain person pixels are removed.
    ///
    /// Returned at `target` x `target` resolution.
    pub fn person_hiding_plane(&self, target: u32) -> Vec<f32> {
        let inverted: Vec<f32> = self
            .data
            .iter()
            .map(|&p| if 1.0 - p > PERSON_TRUNCATE_THRESHOLD { 1.0 } else { 0.0 })
            .collect();
        resize_plane(&inverted, self.size, self.size, target, target)
    }

    /// Plane that blacks out the background when multiplied with the image:
    /// the raw probability grid, resized to `target` x `target`.
    pub fn background_hiding_plane(&self, target: u32) -> Vec<f32> {
        resize_plane(&self.data, self.size, self.size, target, target)
    }
}

/// Pixel-wise multiply of an RGB frame with a single-channel [0,1] plane of
/// the same resolution. Masked-out regions go to black.
pub fn apply_mask(frame: &Frame, plane: &[f32]) -> Frame {
    debug_assert_eq!(
        plane.len(),
        (frame.width() * frame.height()) as usize,
        "mask plane must match frame resolution"
    );
    let ch = frame.channels() as usize;
    let mut data = Vec::with_capacity(frame.data().len());
    for (pixel, &m) in frame.data().chunks_exact(ch).zip(plane.iter()) {
        for &v in pixel {
            data.push((v as f32 * m.clamp(0.0, 1.0)).round() as u8);
        }
    }
    Frame::new(data, frame.width(), frame.height(), frame.channels())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_person_mask(size: u32) -> SegmentationMask {
        // Left half person (1.0), right half background (0.0)
        let mut data = Vec::new();
        for _y in 0..size {
            for x in 0..size {
                data.push(if x < size / 2 { 1.0 } else { 0.0 });
            }
        }
        SegmentationMask::new(data, size)
    }

    #[test]
    fn test_person_hiding_plane_inverts() {
        let mask = half_person_mask(4);
        let plane = mask.person_hiding_plane(4);
        // Person half suppressed, background half kept
        assert_eq!(plane[0], 0.0);
        assert_eq!(plane[3], 1.0);
    }

    #[test]
    fn test_background_hiding_plane_is_raw() {
        let mask = half_person_mask(4);
        let plane = mask.background_hiding_plane(4);
        assert_eq!(plane[0], 1.0);
        assert_eq!(plane[3], 0.0);
    }

    #[test]
    fn test_truncation_drops_uncertain_pixels() {
        // p = 0.2: background-ish, but 1-p = 0.8 is below the 0.9 cutoff,
        // so the sharpened person-hiding plane does not keep it.
        let mask = SegmentationMask::new(vec![0.2; 4], 2);
        let plane = mask.person_hiding_plane(2);
        assert!(plane.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_apply_mask_blacks_out() {
        let frame = Frame::filled(2, 1, [100, 150, 200]);
        let out = apply_mask(&frame, &[1.0, 0.0]);
        assert_eq!(out.pixel(0, 0), [100, 150, 200]);
        assert_eq!(out.pixel(1, 0), [0, 0, 0]);
    }

    #[test]
    fn test_plane_resizing_to_target() {
        let mask = half_person_mask(4);
        let plane = mask.background_hiding_plane(8);
        assert_eq!(plane.len(), 64);
    }
}
