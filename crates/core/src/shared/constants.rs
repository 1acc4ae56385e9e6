// TODO: point the URLs at a published release once the model artifacts are
// uploaded; until then only the cache and bundled lookups can succeed.
pub const SEGMENTER_MODEL_NAME: &str = "munet_mnv3_wm05.onnx";
pub const SEGMENTER_MODEL_URL: &str =
    "https://github.com/passfoto/passfoto/releases/download/v0.1.0/munet_mnv3_wm05.onnx";

pub const SHADOW_CLASSIFIER_MODEL_NAME: &str = "shadow_mobilenet_v2.onnx";
pub const SHADOW_CLASSIFIER_MODEL_URL: &str =
    "https://github.com/passfoto/passfoto/releases/download/v0.1.0/shadow_mobilenet_v2.onnx";

pub const DESHADOW_MODEL_NAME: &str = "pix2pix_deshadow.onnx";
pub const DESHADOW_MODEL_URL: &str =
    "https://github.com/passfoto/passfoto/releases/download/v0.1.0/pix2pix_deshadow.onnx";

/// Passport framing convention: 35 mm wide, 45 mm high.
pub const CROP_WIDTH_FACTOR: f64 = 35.0;
pub const CROP_HEIGHT_FACTOR: f64 = 45.0;
pub const W_TO_H_RATIO: f64 = CROP_WIDTH_FACTOR / CROP_HEIGHT_FACTOR;
pub const H_TO_W_RATIO: f64 = CROP_HEIGHT_FACTOR / CROP_WIDTH_FACTOR;

/// Width of the final saved photo: 3.5 cm at 600 ppi.
pub const FINAL_IMAGE_WIDTH_PX: u32 = 827;
/// Height at the 35:45 ratio, truncated like the width-derived value.
pub const FINAL_IMAGE_HEIGHT_PX: u32 = (FINAL_IMAGE_WIDTH_PX as u64 * 45 / 35) as u32;

/// Square working resolution that segmentation-based steps operate at.
pub const SEGMENTATION_WORK_SIZE: u32 = 448;

/// Working width of a 35:45 crop inside the segmentation square.
pub fn segmentation_work_width() -> u32 {
    (SEGMENTATION_WORK_SIZE as f64 * W_TO_H_RATIO).ceil() as u32
}
