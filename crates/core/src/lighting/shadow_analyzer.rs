use crate::lighting::domain::shadow_classifier::{LightingEvenness, ShadowClassifier};
use crate::lighting::luma_symmetry::is_evenly_lightened;
use crate::shared::config::AnalyzerConfig;
use crate::shared::defect::Defect;
use crate::shared::frame::Frame;

/// Detects uneven face lighting on a square face-only crop.
///
/// The learned classifier has the first word; the luma-symmetry heuristic
/// only breaks ties when the classifier answers `NotSure` or was never
/// loaded. Neither source of doubt alone rejects a frame.
pub struct ShadowAnalyzer {
    classifier: Option<Box<dyn ShadowClassifier>>,
    config: AnalyzerConfig,
}

impl ShadowAnalyzer {
    pub fn new(classifier: Option<Box<dyn ShadowClassifier>>, config: AnalyzerConfig) -> Self {
        Self { classifier, config }
    }

    pub fn analyze(&mut self, face: &Frame) -> Result<Vec<Defect>, Box<dyn std::error::Error>> {
        let verdict = match self.classifier.as_mut() {
            Some(classifier) => classifier.classify(face)?,
            None => LightingEvenness::NotSure,
        };
        let shadowed = match verdict {
            LightingEvenness::Shadow => true,
            LightingEvenness::Evenly => false,
            LightingEvenness::NotSure => {
                is_evenly_lightened(face, self.config.luma_symmetry_threshold) == Some(false)
            }
        };
        Ok(if shadowed {
            vec![Defect::ShadowPresent]
        } else {
            Vec::new()
        })
    }

    pub fn close(&mut self) {
        if let Some(classifier) = self.classifier.as_mut() {
            classifier.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubClassifier {
        verdict: LightingEvenness,
    }

    impl ShadowClassifier for StubClassifier {
        fn classify(
            &mut self,
            _face: &Frame,
        ) -> Result<LightingEvenness, Box<dyn std::error::Error>> {
            Ok(self.verdict)
        }

        fn close(&mut self) {}
    }

    fn analyzer(verdict: Option<LightingEvenness>) -> ShadowAnalyzer {
        let classifier: Option<Box<dyn ShadowClassifier>> =
            verdict.map(|v| Box::new(StubClassifier { verdict: v }) as Box<dyn ShadowClassifier>);
        ShadowAnalyzer::new(classifier, AnalyzerConfig::default())
    }

    /// Strongly side-lit face that the heuristic flags on its own.
    fn shadowed_face() -> Frame {
        let mut face = Frame::filled(60, 60, [0, 0, 0]);
        for y in 0..60u32 {
            for x in 0..60u32 {
                let base = if x < 30 { [200u8, 180] } else { [120, 100] };
                let v = base[(x % 2) as usize];
                let i = ((y * 60 + x) * 3) as usize;
                face.data_mut()[i..i + 3].copy_from_slice(&[v, v, v]);
            }
        }
        face
    }

    #[test]
    fn test_classifier_shadow_verdict_wins() {
        let face = Frame::filled(60, 60, [180, 160, 150]);
        let defects = analyzer(Some(LightingEvenness::Shadow)).analyze(&face).unwrap();
        assert_eq!(defects, vec![Defect::ShadowPresent]);
    }

    #[test]
    fn test_classifier_evenly_overrides_heuristic() {
        // Heuristic would flag this face, but the classifier is confident.
        let defects = analyzer(Some(LightingEvenness::Evenly))
            .analyze(&shadowed_face())
            .unwrap();
        assert!(defects.is_empty());
    }

    #[test]
    fn test_not_sure_falls_back_to_heuristic() {
        let defects = analyzer(Some(LightingEvenness::NotSure))
            .analyze(&shadowed_face())
            .unwrap();
        assert_eq!(defects, vec![Defect::ShadowPresent]);
    }

    #[test]
    fn test_missing_classifier_uses_heuristic() {
        let even_face = Frame::filled(60, 60, [180, 160, 150]);
        assert!(analyzer(None).analyze(&even_face).unwrap().is_empty());
        assert_eq!(
            analyzer(None).analyze(&shadowed_face()).unwrap(),
            vec![Defect::ShadowPresent]
        );
    }
}
