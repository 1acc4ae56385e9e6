//! Face visibility conformance.

pub mod symmetry_analyzer;
