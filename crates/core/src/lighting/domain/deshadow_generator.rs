use crate::shared::frame::Frame;

/// Domain interface for the image-to-image shadow removal network.
///
/// Input and output are square frames at the implementation's working
/// resolution. `None` means the generator is closed or produced no usable
/// image; callers keep the original photo in that case.
pub trait DeshadowGenerator: Send {
    /// Square working resolution expected by `generate`.
    fn input_size(&self) -> u32;

    fn generate(&mut self, image: &Frame) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Release the inference handle; subsequent calls become no-ops.
    fn close(&mut self);
}
