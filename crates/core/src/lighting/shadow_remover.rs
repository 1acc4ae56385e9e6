use crate::imaging::blur::median_blur;
use crate::imaging::pad::{pad_to_square_black, unpad_from_square};
use crate::imaging::resize::resize;
use crate::lighting::domain::deshadow_generator::DeshadowGenerator;
use crate::shared::constants::W_TO_H_RATIO;
use crate::shared::frame::Frame;

/// Kernel for smoothing the original-minus-generated difference before it
/// is subtracted back. Keeps facial detail from the original while taking
/// the lighting from the generator.
const DETAIL_MEDIAN_KERNEL: usize = 21;

/// Removes face shadows from a finished passport photo.
///
/// The generator runs at its own low working resolution; its output is
/// used only as a lighting reference. The final photo is the original
/// minus the smoothed difference to the generated image, so resolution
/// and fine detail survive the round trip. Output dimensions always match
/// the input.
pub struct ShadowRemover {
    generator: Box<dyn DeshadowGenerator>,
}

impl ShadowRemover {
    pub fn new(generator: Box<dyn DeshadowGenerator>) -> Self {
        Self { generator }
    }

    pub fn remove(&mut self, photo: &Frame) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let size = self.generator.input_size();
        let work_width = (size as f64 * W_TO_H_RATIO).ceil() as u32;
        let working = resize(photo, work_width, size);
        let padded = pad_to_square_black(&working, size);

        let Some(generated) = self.generator.generate(&padded)? else {
            return Ok(None);
        };
        let generated = unpad_from_square(&generated, work_width);
        let generated = resize(&generated, photo.width(), photo.height());

        Ok(Some(blend_lighting(photo, &generated)))
    }

    pub fn close(&mut self) {
        self.generator.close();
    }
}

/// Two-pass difference blend: `white - |orig - median(white - |orig - gen|)|`.
///
/// Equivalent to brightening the original by the median-smoothed local
/// difference magnitude, so shadowed regions take the generator's lighting
/// while texture and outliers the generator hallucinated are suppressed.
fn blend_lighting(original: &Frame, generated: &Frame) -> Frame {
    let (w, h) = (original.width() as usize, original.height() as usize);
    let orig = original.data();
    let gen = generated.data();

    let mut inverted: Vec<u8> = orig
        .iter()
        .zip(gen.iter())
        .map(|(&o, &g)| 255 - (o as i32 - g as i32).unsigned_abs() as u8)
        .collect();
    median_blur(&mut inverted, w, h, 3, DETAIL_MEDIAN_KERNEL);

    let data = orig
        .iter()
        .zip(inverted.iter())
        .map(|(&o, &i)| 255 - (o as i32 - i as i32).unsigned_abs() as u8)
        .collect();
    Frame::new(data, original.width(), original.height(), 3)
}
