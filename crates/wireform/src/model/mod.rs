//! Data model types for wireform.
//!
//! - [`Value`]: the parsed, format-agnostic tree over which all marshaling
//!   runs
//! - [`Number`]: wire numbers with lossless integer representation
//! - [`Path`]: key paths for error diagnostics

pub mod path;
pub mod value;

pub use path::{Path, ROOT};
pub use value::{Kind, Number, Value};
