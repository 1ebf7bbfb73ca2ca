//! Wire format: bytes in, [`Value`](crate::Value) out, and back.
//!
//! The rest of the crate is format-agnostic; this module owns the JSON
//! grammar.

pub mod emit;
pub mod parse;

pub use emit::serialize;
pub use parse::parse;
