//! Template substitution

pub mod replacements;
pub mod renderer;
pub mod xml;

pub use replacements::{ReplacementMap, TemplateTokens};
pub use renderer::{render, render_xml};
