/// Person segmentation using a MobileNetV3 U-Net via ONNX Runtime (`ort`).
use std::path::Path;

use crate::imaging::resize::resize;
use crate::segmentation::domain::person_segmenter::PersonSegmenter;
use crate::segmentation::domain::segmentation_mask::{apply_mask, SegmentationMask};
use crate::shared::frame::Frame;

/// Network input resolution (square RGB).
const INPUT_SIZE: u32 = 224;

/// Input normalization: `(v - MEAN) / STD`.
const IMAGE_MEAN: f32 = 127.5;
const IMAGE_STD: f32 = 127.5;

/// Encoder-decoder person segmenter backed by an ONNX Runtime session.
///
/// `segment` keeps a copy of the working image so the composite accessors
/// can derive background/foreground views at the working resolution.
pub struct OnnxUnetSegmenter {
    session: Option<ort::session::Session>,
    image: Option<Frame>,
    mask: Option<SegmentationMask>,
}

impl OnnxUnetSegmenter {
    /// Load the segmentation model. Failure here means the segmenter is
    /// unavailable for the whole session; callers keep going without it.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        log::debug!("loaded person segmentation model from {}", model_path.display());
        Ok(Self {
            session: Some(session),
            image: None,
            mask: None,
        })
    }

    fn work_size(&self) -> Option<u32> {
        self.image.as_ref().map(|i| i.width())
    }
}

impl PersonSegmenter for OnnxUnetSegmenter {
    fn segment(&mut self, image: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let Some(session) = self.session.as_mut() else {
            log::warn!("person segmenter is closed; skipping segmentation");
            self.image = None;
            self.mask = None;
            return Ok(());
        };
        debug_assert_eq!(image.width(), image.height(), "working image must be square");

        let input_tensor = preprocess(image);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = session.run(ort::inputs![input_value])?;

        let output = outputs[0].try_extract_array::<f32>()?;
        let flat = output.as_slice().ok_or("Cannot get segmentation map slice")?;
        let expected = (INPUT_SIZE * INPUT_SIZE) as usize;
        if flat.len() != expected {
            return Err(format!(
                "segmentation model returned {} values, expected {expected}",
                flat.len()
            )
            .into());
        }

        self.mask = Some(SegmentationMask::new(flat.to_vec(), INPUT_SIZE));
        self.image = Some(image.clone());
        Ok(())
    }

    fn masked_person(&self) -> Option<Vec<f32>> {
        let target = self.work_size()?;
        Some(self.mask.as_ref()?.person_hiding_plane(target))
    }

    fn masked_background(&self) -> Option<Vec<f32>> {
        let target = self.work_size()?;
        Some(self.mask.as_ref()?.background_hiding_plane(target))
    }

    fn background(&self) -> Option<Frame> {
        let image = self.image.as_ref()?;
        let plane = self.masked_person()?;
        Some(apply_mask(image, &plane))
    }

    fn foreground(&self) -> Option<Frame> {
        let image = self.image.as_ref()?;
        let plane = self.masked_background()?;
        Some(apply_mask(image, &plane))
    }

    fn close(&mut self) {
        self.session = None;
        self.image = None;
        self.mask = None;
    }
}

/// Resize to the model input and normalize to NCHW float32.
fn preprocess(image: &Frame) -> ndarray::Array4<f32> {
    let resized = resize(image, INPUT_SIZE, INPUT_SIZE);
    let src = resized.as_ndarray();
    let s = INPUT_SIZE as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    for y in 0..s {
        for x in 0..s {
            for c in 0..3 {
                tensor[[0, c, y, x]] = (src[[y, x, c]] as f32 - IMAGE_MEAN) / IMAGE_STD;
            }
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_shape() {
        let frame = Frame::filled(448, 448, [128, 128, 128]);
        let tensor = preprocess(&frame);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_normalization() {
        let frame = Frame::filled(224, 224, [255, 0, 128]);
        let tensor = preprocess(&frame);
        // (255 - 127.5) / 127.5 = 1.0
        assert!((tensor[[0, 0, 10, 10]] - 1.0).abs() < 0.01);
        // (0 - 127.5) / 127.5 = -1.0
        assert!((tensor[[0, 1, 10, 10]] + 1.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_model_file_fails_to_load() {
        assert!(OnnxUnetSegmenter::new(Path::new("/nonexistent/model.onnx")).is_err());
    }
}
