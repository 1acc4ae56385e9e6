/// Shadow removal with a pix2pix generator via ONNX Runtime.
use std::path::Path;

use crate::imaging::resize::resize;
use crate::lighting::domain::deshadow_generator::DeshadowGenerator;
use crate::shared::frame::Frame;

/// Network input and output resolution (square RGB).
const INPUT_SIZE: u32 = 256;

/// The generator's output sits a few pixels off its input; upscale to this
/// size and crop back to re-register it. Values measured against the
/// training pipeline.
const DRIFT_RESIZE: u32 = 259;
const DRIFT_TOP: u32 = 3;
const DRIFT_LEFT: u32 = 1;

/// Image-to-image generator that repaints shadowed regions.
pub struct OnnxPix2PixGenerator {
    session: Option<ort::session::Session>,
}

impl OnnxPix2PixGenerator {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        log::debug!("loaded deshadow generator model from {}", model_path.display());
        Ok(Self {
            session: Some(session),
        })
    }
}

impl DeshadowGenerator for OnnxPix2PixGenerator {
    fn input_size(&self) -> u32 {
        INPUT_SIZE
    }

    fn generate(&mut self, image: &Frame) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(session) = self.session.as_mut() else {
            log::warn!("deshadow generator is closed; skipping");
            return Ok(None);
        };

        let input_tensor = preprocess(image);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = session.run(ort::inputs![input_value])?;

        let output = outputs[0].try_extract_array::<f32>()?;
        let flat = output.as_slice().ok_or("Cannot get generator output slice")?;
        let expected = (3 * INPUT_SIZE * INPUT_SIZE) as usize;
        if flat.len() != expected {
            return Err(format!(
                "deshadow model returned {} values, expected {expected}",
                flat.len()
            )
            .into());
        }

        Ok(Some(undrift(&postprocess(flat))))
    }

    fn close(&mut self) {
        self.session = None;
    }
}

/// NCHW float32, channels scaled to 0..1.
fn preprocess(image: &Frame) -> ndarray::Array4<f32> {
    let resized = resize(image, INPUT_SIZE, INPUT_SIZE);
    let src = resized.as_ndarray();
    let s = INPUT_SIZE as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    for y in 0..s {
        for x in 0..s {
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[y, x, c]] as f32 / 255.0;
            }
        }
    }
    tensor
}

/// Planar 0..1 output back to an interleaved RGB frame.
fn postprocess(flat: &[f32]) -> Frame {
    let s = INPUT_SIZE as usize;
    let plane = s * s;
    let mut data = Vec::with_capacity(plane * 3);
    for i in 0..plane {
        for c in 0..3 {
            data.push((flat[c * plane + i].clamp(0.0, 1.0) * 255.0).round() as u8);
        }
    }
    Frame::new(data, INPUT_SIZE, INPUT_SIZE, 3)
}

/// Undo the generator's spatial drift: scale up slightly and crop the
/// registered window back out.
fn undrift(frame: &Frame) -> Frame {
    let grown = resize(frame, DRIFT_RESIZE, DRIFT_RESIZE);
    let s = INPUT_SIZE as usize;
    let gw = DRIFT_RESIZE as usize;
    let data = grown.data();
    let mut out = Vec::with_capacity(s * s * 3);
    for y in 0..s {
        let src_y = y + DRIFT_TOP as usize;
        let start = (src_y * gw + DRIFT_LEFT as usize) * 3;
        out.extend_from_slice(&data[start..start + s * 3]);
    }
    Frame::new(out, INPUT_SIZE, INPUT_SIZE, 3)
}
