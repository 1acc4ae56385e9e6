//! Background conformance and enhancement.
//!
//! The analyzer scores uniformity from several independent probes and
//! checks brightness; the enhancer rebuilds the background of a finished
//! photo from a blurred, brightened copy of itself.

pub mod analyzer;
pub mod blob_detector;
pub mod enhancer;
pub mod pixel_sampler;
pub mod properties;
