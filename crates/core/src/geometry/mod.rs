pub mod crop_builder;
pub mod pose_validator;
