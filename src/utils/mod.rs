//! Utility functions

pub mod naming;

pub use naming::{output_names, output_stem, sanitize_component};
