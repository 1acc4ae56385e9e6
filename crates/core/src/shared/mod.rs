pub mod config;
pub mod constants;
pub mod defect;
pub mod face_observation;
pub mod frame;
pub mod model_resolver;
pub mod rect;
