pub mod onnx_unet_segmenter;
