//! Core data models for certificate generation

pub mod record;
pub mod document;
pub mod batch;

pub use record::*;
pub use document::*;
pub use batch::*;
