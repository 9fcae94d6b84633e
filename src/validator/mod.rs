//! Template checks

pub mod tokens;

pub use tokens::{check_tokens, TokenCheck};
