pub mod onnx_pix2pix_generator;
pub mod onnx_shadow_classifier;
