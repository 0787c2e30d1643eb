//! Comment annotation format migration.
//!
//! Converts comments from the old flat layout (annotation fields inline on
//! the comment) to the nested layout with top-level `comment`, `labelling`
//! and `entities` keys.

pub mod reshape;
pub mod stream;

pub use reshape::reshape;
pub use stream::{convert, open_input};
