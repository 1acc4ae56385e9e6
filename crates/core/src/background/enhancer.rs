use crate::imaging::blur::{box_blur, median_blur};
use crate::imaging::color::brighten_in_place;
use crate::imaging::morph::threshold_binary;
use crate::imaging::pad::{pad_to_square_replicate, unpad_plane};
use crate::imaging::resize::{resize_plane, resize_to_width};
use crate::segmentation::domain::person_segmenter::PersonSegmenter;
use crate::shared::constants::{segmentation_work_width, SEGMENTATION_WORK_SIZE};
use crate::shared::frame::Frame;

/// Smoothing kernels applied to the replacement background.
const BACKGROUND_BLUR_KERNEL: usize = 50;
const BACKGROUND_MEDIAN_KERNEL: usize = 51;
/// Flat brightness lift on the replacement background.
const BACKGROUND_BRIGHTEN: u8 = 30;
/// Softening kernel for the person mask edge.
const MASK_FEATHER_KERNEL: usize = 15;
const MASK_BINARY_CUTOFF: u8 = 127;

/// Replaces the background of a finished passport photo with a blurred,
/// brightened copy of itself, keeping the person untouched.
///
/// The output always has the source dimensions. `enhance` returns
/// `Ok(None)` when segmentation yields no usable person mask, so callers
/// can fall back to the unmodified photo.
pub struct BackgroundEnhancer {
    segmenter: Box<dyn PersonSegmenter>,
}

impl BackgroundEnhancer {
    pub fn new(segmenter: Box<dyn PersonSegmenter>) -> Self {
        Self { segmenter }
    }

    pub fn enhance(&mut self, src: &Frame) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(mask) = self.person_mask(src)? else {
            return Ok(None);
        };

        let (w, h) = (src.width() as usize, src.height() as usize);
        let mut replacement = src.clone();
        box_blur(replacement.data_mut(), w, h, 3, BACKGROUND_BLUR_KERNEL);
        median_blur(replacement.data_mut(), w, h, 3, BACKGROUND_MEDIAN_KERNEL);
        brighten_in_place(&mut replacement, BACKGROUND_BRIGHTEN);

        let mut out = vec![0u8; w * h * 3];
        let src_data = src.data();
        let bg_data = replacement.data();
        for (i, &m) in mask.iter().enumerate() {
            let m = f64::from(m).clamp(0.0, 1.0);
            for c in 0..3 {
                let v = src_data[i * 3 + c] as f64 * m + bg_data[i * 3 + c] as f64 * (1.0 - m);
                out[i * 3 + c] = v.round() as u8;
            }
        }
        Ok(Some(Frame::new(out, src.width(), src.height(), 3)))
    }

    pub fn close(&mut self) {
        self.segmenter.close();
    }

    /// Soft person mask at source resolution, 1 at person pixels.
    ///
    /// Segmentation runs at working resolution; the plane is binarized,
    /// feathered, then scaled back up so the person edge blends instead
    /// of aliasing.
    fn person_mask(&mut self, src: &Frame) -> Result<Option<Vec<f32>>, Box<dyn std::error::Error>> {
        let work_width = segmentation_work_width();
        let working = resize_to_width(src, work_width);
        let padded = pad_to_square_replicate(&working, SEGMENTATION_WORK_SIZE);
        self.segmenter.segment(&padded)?;

        let Some(plane) = self.segmenter.masked_background() else {
            log::warn!("segmenter produced no person plane, leaving photo unmodified");
            return Ok(None);
        };
        let size = SEGMENTATION_WORK_SIZE as usize;
        let bytes: Vec<u8> = plane
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0) as u8)
            .collect();
        let mut bytes = threshold_binary(&bytes, MASK_BINARY_CUTOFF);
        box_blur(&mut bytes, size, size, 1, MASK_FEATHER_KERNEL);

        let soft: Vec<f32> = bytes.iter().map(|&v| v as f32 / 255.0).collect();
        let soft = unpad_plane(
            &soft,
            SEGMENTATION_WORK_SIZE,
            SEGMENTATION_WORK_SIZE,
            work_width,
        );
        let mask = resize_plane(
            &soft,
            work_width,
            working.height(),
            src.width(),
            src.height(),
        );
        Ok(Some(mask))
    }
}
