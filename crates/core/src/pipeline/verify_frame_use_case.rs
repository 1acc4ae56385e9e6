use std::path::Path;

use crate::background::analyzer::BackgroundAnalyzer;
use crate::geometry::crop_builder::{face_only_crop, passport_crop};
use crate::geometry::pose_validator::validate_faces;
use crate::lighting::infrastructure::onnx_shadow_classifier::OnnxShadowClassifier;
use crate::lighting::shadow_analyzer::ShadowAnalyzer;
use crate::segmentation::infrastructure::onnx_unet_segmenter::OnnxUnetSegmenter;
use crate::shared::config::AnalyzerConfig;
use crate::shared::constants::{
    SEGMENTER_MODEL_NAME, SEGMENTER_MODEL_URL, SHADOW_CLASSIFIER_MODEL_NAME,
    SHADOW_CLASSIFIER_MODEL_URL,
};
use crate::shared::defect::FrameVerdict;
use crate::shared::face_observation::FaceObservation;
use crate::shared::frame::Frame;
use crate::shared::model_resolver::{self, ModelSpec};
use crate::visibility::symmetry_analyzer::SymmetryAnalyzer;

/// Orchestrates one verification cycle: face geometry, background,
/// lighting and visibility checks on a single camera frame.
///
/// Wires domain analyzers together. Model-backed analyzers are optional:
/// when a model cannot be resolved the corresponding checks are skipped
/// for the whole session instead of failing every frame, and the skip is
/// logged once at construction.
pub struct VerifyFrameUseCase {
    config: AnalyzerConfig,
    background: Option<BackgroundAnalyzer>,
    shadow: ShadowAnalyzer,
    visibility: SymmetryAnalyzer,
}

impl VerifyFrameUseCase {
    pub fn new(
        config: AnalyzerConfig,
        background: Option<BackgroundAnalyzer>,
        shadow: ShadowAnalyzer,
        visibility: SymmetryAnalyzer,
    ) -> Self {
        Self {
            config,
            background,
            shadow,
            visibility,
        }
    }

    /// Build a use case with the stock ONNX models, resolving each from
    /// the cache, `models_dir`, or the release download in that order.
    pub fn with_default_models(config: AnalyzerConfig, models_dir: Option<&Path>) -> Self {
        let segmenter_spec = ModelSpec {
            name: SEGMENTER_MODEL_NAME,
            url: SEGMENTER_MODEL_URL,
        };
        let background = match model_resolver::resolve(&segmenter_spec, models_dir)
            .map_err(Into::into)
            .and_then(|path| OnnxUnetSegmenter::new(&path))
        {
            Ok(segmenter) => Some(BackgroundAnalyzer::new(Box::new(segmenter), config)),
            Err(err) => {
                log::warn!("background checks disabled, segmentation model unavailable: {err}");
                None
            }
        };

        let classifier_spec = ModelSpec {
            name: SHADOW_CLASSIFIER_MODEL_NAME,
            url: SHADOW_CLASSIFIER_MODEL_URL,
        };
        let classifier = match model_resolver::resolve(&classifier_spec, models_dir)
            .map_err(Into::into)
            .and_then(|path| OnnxShadowClassifier::new(&path, config.shadow_classifier_margin))
        {
            Ok(classifier) => Some(Box::new(classifier) as _),
            Err(err) => {
                log::warn!("shadow classifier unavailable, using heuristic only: {err}");
                None
            }
        };

        Self::new(
            config,
            background,
            ShadowAnalyzer::new(classifier, config),
            SymmetryAnalyzer::new(config),
        )
    }

    /// Verify one frame against the detected faces.
    ///
    /// Face count and pose come first; content checks only run when
    /// exactly one face is present and its crops fit inside the frame.
    pub fn verify(
        &mut self,
        frame: &Frame,
        faces: &[FaceObservation],
    ) -> Result<FrameVerdict, Box<dyn std::error::Error>> {
        let mut defects = validate_faces(faces, &self.config);

        if let [face] = faces {
            if let Some(analyzer) = self.background.as_mut() {
                if let Some(crop) = passport_crop(face, &self.config, frame.width(), frame.height())
                    .and_then(|rect| frame.crop(rect))
                {
                    defects.extend(analyzer.analyze(&crop)?);
                }
            }

            if let Some(crop) = face_only_crop(face, &self.config, frame.width(), frame.height())
                .and_then(|rect| frame.crop(rect))
            {
                defects.extend(self.shadow.analyze(&crop)?);
                defects.extend(self.visibility.analyze(&crop));
            }
        }

        let verdict = FrameVerdict::new(defects);
        log::info!("frame verdict {:?}: {:?}", verdict.severity(), verdict.defects());
        Ok(verdict)
    }

    /// Release all inference handles. Further `verify` calls still work
    /// but only report geometry defects.
    pub fn close(&mut self) {
        if let Some(analyzer) = self.background.as_mut() {
            analyzer.close();
        }
        self.shadow.close();
    }
}
