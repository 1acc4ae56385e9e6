use std::path::Path;

use crate::background::enhancer::BackgroundEnhancer;
use crate::geometry::crop_builder::passport_crop;
use crate::imaging::resize::resize;
use crate::lighting::infrastructure::onnx_pix2pix_generator::OnnxPix2PixGenerator;
use crate::lighting::shadow_remover::ShadowRemover;
use crate::segmentation::infrastructure::onnx_unet_segmenter::OnnxUnetSegmenter;
use crate::shared::config::AnalyzerConfig;
use crate::shared::constants::{
    DESHADOW_MODEL_NAME, DESHADOW_MODEL_URL, FINAL_IMAGE_HEIGHT_PX, FINAL_IMAGE_WIDTH_PX,
    SEGMENTER_MODEL_NAME, SEGMENTER_MODEL_URL,
};
use crate::shared::face_observation::FaceObservation;
use crate::shared::frame::Frame;
use crate::shared::model_resolver::{self, ModelSpec};

/// Produces the final passport photo from an accepted capture.
///
/// Crops the frame around the face, scales to the print resolution, then
/// optionally removes face shadows and rebuilds the background. Each
/// enhancement step is best effort: a missing model or an abstaining step
/// leaves the photo as it was, never fails the capture.
pub struct EnhanceCaptureUseCase {
    config: AnalyzerConfig,
    remover: Option<ShadowRemover>,
    enhancer: Option<BackgroundEnhancer>,
}

impl EnhanceCaptureUseCase {
    pub fn new(
        config: AnalyzerConfig,
        remover: Option<ShadowRemover>,
        enhancer: Option<BackgroundEnhancer>,
    ) -> Self {
        Self {
            config,
            remover,
            enhancer,
        }
    }

    /// Build a use case with the stock ONNX models. Either enhancement
    /// can be declined up front; an undeclined model that fails to
    /// resolve is logged and skipped.
    pub fn with_default_models(
        config: AnalyzerConfig,
        models_dir: Option<&Path>,
        remove_shadow: bool,
        enhance_background: bool,
    ) -> Self {
        let remover = if remove_shadow {
            let spec = ModelSpec {
                name: DESHADOW_MODEL_NAME,
                url: DESHADOW_MODEL_URL,
            };
            match model_resolver::resolve(&spec, models_dir)
                .map_err(Into::into)
                .and_then(|path| OnnxPix2PixGenerator::new(&path))
            {
                Ok(generator) => Some(ShadowRemover::new(Box::new(generator))),
                Err(err) => {
                    log::warn!("shadow removal disabled, model unavailable: {err}");
                    None
                }
            }
        } else {
            None
        };

        let enhancer = if enhance_background {
            let spec = ModelSpec {
                name: SEGMENTER_MODEL_NAME,
                url: SEGMENTER_MODEL_URL,
            };
            match model_resolver::resolve(&spec, models_dir)
                .map_err(Into::into)
                .and_then(|path| OnnxUnetSegmenter::new(&path))
            {
                Ok(segmenter) => Some(BackgroundEnhancer::new(Box::new(segmenter))),
                Err(err) => {
                    log::warn!("background enhancement disabled, model unavailable: {err}");
                    None
                }
            }
        } else {
            None
        };

        Self::new(config, remover, enhancer)
    }

    /// Produce the print-resolution photo, or `None` when the passport
    /// crop does not fit inside the frame.
    pub fn produce(
        &mut self,
        frame: &Frame,
        face: &FaceObservation,
    ) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(rect) = passport_crop(face, &self.config, frame.width(), frame.height()) else {
            return Ok(None);
        };
        let Some(crop) = frame.crop(rect) else {
            return Ok(None);
        };
        let mut photo = resize(&crop, FINAL_IMAGE_WIDTH_PX, FINAL_IMAGE_HEIGHT_PX);

        if let Some(remover) = self.remover.as_mut() {
            if let Some(cleaned) = remover.remove(&photo)? {
                photo = cleaned;
            }
        }
        if let Some(enhancer) = self.enhancer.as_mut() {
            if let Some(rebuilt) = enhancer.enhance(&photo)? {
                photo = rebuilt;
            }
        }
        Ok(Some(photo))
    }

    pub fn close(&mut self) {
        if let Some(remover) = self.remover.as_mut() {
            remover.close();
        }
        if let Some(enhancer) = self.enhancer.as_mut() {
            enhancer.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::rect::Rect;

    #[test]
    fn test_produces_print_resolution_photo() {
        let frame = Frame::filled(800, 800, [200, 200, 200]);
        let face = FaceObservation::frontal(Rect::new(340, 350, 460, 500));
        let mut use_case = EnhanceCaptureUseCase::new(AnalyzerConfig::default(), None, None);
        let photo = use_case.produce(&frame, &face).unwrap().unwrap();
        assert_eq!(photo.width(), 827);
        assert_eq!(photo.height(), 1063);
    }

    #[test]
    fn test_face_too_close_to_border_yields_none() {
        let frame = Frame::filled(300, 300, [200, 200, 200]);
        let face = FaceObservation::frontal(Rect::new(0, 0, 200, 260));
        let mut use_case = EnhanceCaptureUseCase::new(AnalyzerConfig::default(), None, None);
        assert!(use_case.produce(&frame, &face).unwrap().is_none());
    }
}
