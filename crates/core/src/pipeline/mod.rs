//! Use cases wiring the analyzers into verification and capture flows.

pub mod enhance_capture_use_case;
pub mod infrastructure;
pub mod verify_frame_use_case;
