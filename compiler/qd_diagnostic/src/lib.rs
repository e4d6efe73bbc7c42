//! Diagnostic system for rich error reporting.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//! - Optional notes and help text (how to fix it)
//!
//! Rendering lives in [`emitter`]: a colored terminal format with source
//! snippets and a serde_json array for tooling.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
