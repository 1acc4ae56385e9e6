pub mod deshadow_generator;
pub mod shadow_classifier;
