//! Passport photo verification and enhancement.
//!
//! The crate checks a camera frame against passport photo conformance
//! rules (single frontal face, uniform bright background, even lighting,
//! uncovered face) and turns an accepted capture into a print-resolution
//! photo with optional shadow removal and background cleanup.
//!
//! Layout follows one directory per concern, with `domain` traits at the
//! seams and `infrastructure` holding the ONNX Runtime implementations.

pub mod background;
pub mod geometry;
pub mod imaging;
pub mod lighting;
pub mod pipeline;
pub mod segmentation;
pub mod shared;
pub mod visibility;
