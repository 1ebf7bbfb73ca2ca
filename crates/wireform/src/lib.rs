//! wireform: typed marshaling between JSON wire shapes and in-memory records.
//!
//! This crate is a small marshaling core: parse wire bytes into a
//! format-agnostic [`Value`] tree, decode typed records out of it through
//! cursor-like accessors, and encode records back — including wire layouts
//! that differ from the in-memory layout, and wire objects whose keys are
//! data rather than schema.
//!
//! # Overview
//!
//! - **Lossless values**: mappings keep insertion order and reject
//!   duplicate keys; integers never silently become floats; a string field
//!   never silently accepts a wire number.
//! - **Two binding styles per record**: auto-derived via [`record!`]
//!   (field names are wire keys), or a hand-written reshaping
//!   [`Decode`]/[`Encode`] pair when the wire nests an envelope the record
//!   flattens away.
//! - **Optional means absent**: an optional field decodes `None` from a
//!   missing key and omits the key entirely on encode — never writes null.
//! - **Dynamic keys**: [`decode_dynamic`]/[`encode_dynamic`] lift
//!   data-bearing object keys into a record field and back.
//!
//! # Quick Start
//!
//! ```rust
//! use wireform::{from_json, to_json};
//!
//! wireform::record! {
//!     pub struct Pet {
//!         name: String,
//!         nickname: Option<String>,
//!     }
//! }
//!
//! // Unknown keys ("age") are ignored; absent optionals decode to None.
//! let pet: Pet = from_json(br#"{"name":"Rex","age":3}"#).unwrap();
//! assert_eq!(pet.name, "Rex");
//! assert_eq!(pet.nickname, None);
//!
//! // None omits the key entirely.
//! assert_eq!(to_json(&pet).unwrap(), br#"{"name":"Rex"}"#);
//! ```
//!
//! # Modules
//!
//! - [`model`]: the [`Value`] tree, numbers, and diagnostic key paths
//! - [`wire`]: `bytes -> Value` parsing and `Value -> bytes` serialization
//! - [`codec`]: accessors, typed bindings, and the dynamic-key adapter
//! - [`error`]: one error type per pipeline stage
//! - [`limits`]: security limits for parsing untrusted input
//!
//! # Errors
//!
//! Decode and encode fail fast: the first error propagates with the full
//! key path of the offending node (e.g. `$.friends[1].bodyShape`). The only
//! silent cases are an absent optional field and unknown extra wire keys.
//!
//! # Concurrency
//!
//! Everything here is a pure computation over an in-memory tree. Values
//! are immutable once built and codecs are stateless, so decoding
//! different buffers in parallel needs no locking.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod wire;

// Re-export commonly used types at crate root
pub use codec::{
    decode_dynamic, decode_value, encode_dynamic, encode_value, from_json, to_json, Decode,
    DynamicRecord, Encode, FieldCodec, MapAccessor, MapBuilder, SeqBuilder, SeqCursor,
};
pub use error::{DecodeError, EncodeError, Error, ParseError, SerializeError};
pub use model::{Kind, Number, Path, Value, ROOT};
pub use wire::{parse, serialize};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
