//! OpenAPI schema preprocessing.
//!
//! The upstream spec generator sometimes emits properties typed as literal
//! null (`"type": "null"` or `"enum": [null]`), which strict client
//! generators reject. This module rewrites such properties to nullable
//! strings and validates the document before and after.

pub mod patch;
pub mod process;

pub use process::{Outcome, preprocess_spec};
