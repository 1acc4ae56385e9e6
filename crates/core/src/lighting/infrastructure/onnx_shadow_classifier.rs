/// Face-shadow classification using a MobileNetV2 head via ONNX Runtime.
use std::path::Path;

use crate::imaging::resize::resize;
use crate::lighting::domain::shadow_classifier::{LightingEvenness, ShadowClassifier};
use crate::shared::frame::Frame;

/// Network input resolution (square RGB).
const INPUT_SIZE: u32 = 160;

/// Binary shadow classifier producing a single logit, positive for shadow.
///
/// Scores inside the dead band around zero map to `NotSure` so that the
/// luma-symmetry heuristic decides instead of a coin-flip logit.
pub struct OnnxShadowClassifier {
    session: Option<ort::session::Session>,
    margin: f64,
}

impl OnnxShadowClassifier {
    pub fn new(model_path: &Path, margin: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        log::debug!("loaded shadow classifier model from {}", model_path.display());
        Ok(Self {
            session: Some(session),
            margin,
        })
    }
}

impl ShadowClassifier for OnnxShadowClassifier {
    fn classify(&mut self, face: &Frame) -> Result<LightingEvenness, Box<dyn std::error::Error>> {
        let Some(session) = self.session.as_mut() else {
            log::warn!("shadow classifier is closed; reporting NOT_SURE");
            return Ok(LightingEvenness::NotSure);
        };

        let input_tensor = preprocess(face);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = session.run(ort::inputs![input_value])?;

        let output = outputs[0].try_extract_array::<f32>()?;
        let score = *output
            .iter()
            .next()
            .ok_or("shadow classifier returned no score")? as f64;
        Ok(bucket(score, self.margin))
    }

    fn close(&mut self) {
        self.session = None;
    }
}

fn bucket(score: f64, margin: f64) -> LightingEvenness {
    if score > margin {
        LightingEvenness::Shadow
    } else if score < -margin {
        LightingEvenness::Evenly
    } else {
        LightingEvenness::NotSure
    }
}

/// Resize to the model input as NCHW float32. This network was trained on
/// raw 0-255 channel values, so no normalization is applied.
fn preprocess(face: &Frame) -> ndarray::Array4<f32> {
    let resized = resize(face, INPUT_SIZE, INPUT_SIZE);
    let src = resized.as_ndarray();
    let s = INPUT_SIZE as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    for y in 0..s {
        for x in 0..s {
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[y, x, c]] as f32;
            }
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket(1.2, 0.5), LightingEvenness::Shadow);
        assert_eq!(bucket(-1.2, 0.5), LightingEvenness::Evenly);
        assert_eq!(bucket(0.3, 0.5), LightingEvenness::NotSure);
        assert_eq!(bucket(-0.3, 0.5), LightingEvenness::NotSure);
    }

    #[test]
    fn test_preprocess_keeps_raw_range() {
        let face = Frame::filled(160, 160, [255, 0, 64]);
        let tensor = preprocess(&face);
        assert_eq!(tensor.shape(), &[1, 3, 160, 160]);
        assert_eq!(tensor[[0, 0, 5, 5]], 255.0);
        assert_eq!(tensor[[0, 1, 5, 5]], 0.0);
        assert_eq!(tensor[[0, 2, 5, 5]], 64.0);
    }

    #[test]
    fn test_missing_model_file_fails_to_load() {
        assert!(OnnxShadowClassifier::new(Path::new("/nonexistent/model.onnx"), 0.5).is_err());
    }
}
