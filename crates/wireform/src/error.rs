//! Error types for parsing, serialization, and typed marshaling.

use thiserror::Error;

use crate::model::Kind;

/// Error while parsing wire bytes into a [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("malformed number at byte {offset}")]
    InvalidNumber { offset: usize },

    #[error("invalid escape sequence in string at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("invalid UTF-8 in string at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("duplicate key {key:?} in object at byte {offset}")]
    DuplicateKey { key: String, offset: usize },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },

    #[error("trailing data after value at byte {offset}")]
    TrailingData { offset: usize },
}

/// Error while serializing a [`Value`](crate::Value) to wire bytes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializeError {
    #[error("non-finite number cannot be serialized")]
    NonFiniteNumber,
}

/// Error while decoding a typed record out of a [`Value`](crate::Value) tree.
///
/// Every variant carries the rendered key path of the offending node
/// (e.g. `$.friends[1].bodyShape`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("missing required key at {path}")]
    MissingKey { path: String },

    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: Kind,
        found: Kind,
    },

    #[error("expected a mapping at {path}, found {found}")]
    NotAMapping { path: String, found: Kind },

    #[error("expected a sequence at {path}, found {found}")]
    NotASequence { path: String, found: Kind },

    #[error("sequence at {path} has no more elements")]
    SequenceExhausted { path: String },

    #[error("number at {path} does not fit the target type")]
    NumberOutOfRange { path: String },
}

/// Error while encoding a typed record into a [`Value`](crate::Value) tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("non-finite number cannot be encoded")]
    NonFiniteNumber,
}

/// Umbrella error for the bytes-to-record entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
