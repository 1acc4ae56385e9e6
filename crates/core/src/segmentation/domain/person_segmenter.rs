use crate::shared::frame::Frame;

/// Domain interface for foreground/background person segmentation.
///
/// The contract is stateful within one analysis call: `segment` stores the
/// working image and its mask, then the accessors derive masks and
/// composites from that stored state. Accessors return `None` until a
/// successful `segment` call, and again after `close`.
///
/// A given implementation's inference handle must not be shared across
/// threads; analyzers that run in parallel each own a private instance.
pub trait PersonSegmenter: Send {
    /// Run segmentation on a square working image. After `close`, this is
    /// a no-op.
    fn segment(&mut self, image: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Plane (working resolution) that hides the person: 1 at background.
    fn masked_person(&self) -> Option<Vec<f32>>;

    /// Plane (working resolution) that hides the background: 1 at person.
    fn masked_background(&self) -> Option<Vec<f32>>;

    /// The working image with the detected person painted black.
    fn background(&self) -> Option<Frame>;

    /// The working image with the detected background painted black.
    fn foreground(&self) -> Option<Frame>;

    /// Release the inference handle; subsequent calls become no-ops.
    fn close(&mut self);
}
