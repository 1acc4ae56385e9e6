//! Face lighting conformance and shadow removal.

pub mod domain;
pub mod infrastructure;
pub mod luma_symmetry;
pub mod shadow_analyzer;
pub mod shadow_remover;
