use crate::shared::frame::Frame;

/// Classifier verdict on how evenly the face is lit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightingEvenness {
    Evenly,
    NotSure,
    Shadow,
}

/// Domain interface for the learned face-shadow classifier.
///
/// Input is a square face-only crop. `NotSure` is a first-class outcome
/// so a heuristic fallback can break the tie instead of the classifier
/// guessing.
pub trait ShadowClassifier: Send {
    fn classify(&mut self, face: &Frame) -> Result<LightingEvenness, Box<dyn std::error::Error>>;

    /// Release the inference handle; subsequent calls become no-ops.
    fn close(&mut self);
}
