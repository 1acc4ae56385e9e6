//! Pure pixel primitives shared by the analyzers and enhancers.
//!
//! Everything here operates on plain byte planes or [`Frame`]s with no model
//! or policy knowledge; thresholds live with the analyzers.
//!
//! [`Frame`]: crate::shared::frame::Frame

pub mod blur;
pub mod color;
pub mod edges;
pub mod io;
pub mod morph;
pub mod pad;
pub mod resize;
pub mod stats;
pub mod template;
pub mod yuv;
