//! Typed marshaling between records and [`Value`] trees.
//!
//! The per-type codec registry is the pair of [`Decode`] and [`Encode`]
//! impls: stateless, statically dispatched, owning no data. Two binding
//! styles exist per record type, selected once when the type is declared:
//!
//! - **Auto-derived** via [`record!`](crate::record): field names map to
//!   wire keys 1:1 (with optional renames), walked in declaration order.
//! - **Custom (reshaping)**: a hand-written impl pair that descends
//!   through intermediate accessors when the in-memory layout differs from
//!   the wire layout.
//!
//! Unknown extra wire keys are silently dropped on decode — a codec only
//! ever reads the keys its schema declares.

pub mod access;
pub mod dynamic;
pub mod record;

use crate::error::{DecodeError, EncodeError, Error};
use crate::model::{Kind, Number, Path, Value, ROOT};
use crate::wire::{parse, serialize};

pub use access::{MapAccessor, MapBuilder, SeqBuilder, SeqCursor};
pub use dynamic::{decode_dynamic, encode_dynamic, DynamicRecord};

/// Decodes `Self` out of one [`Value`] node.
///
/// `path` is the node's position in the tree, used only for diagnostics.
pub trait Decode: Sized {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError>;
}

/// Encodes `self` into a fresh [`Value`] node.
pub trait Encode {
    fn encode(&self) -> Result<Value, EncodeError>;
}

/// Field-level codec: how a declared field reads from and writes to a
/// mapping. The `Option<T>` impl carries the optional-field semantics —
/// absent key decodes to `None`, and `None` omits the key on encode.
pub trait FieldCodec: Sized {
    fn decode_field(map: &MapAccessor<'_, '_>, key: &str) -> Result<Self, DecodeError>;
    fn encode_field(&self, map: &mut MapBuilder, key: &str) -> Result<(), EncodeError>;
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Decodes a record from an already-parsed [`Value`] tree.
pub fn decode_value<T: Decode>(value: &Value) -> Result<T, DecodeError> {
    T::decode(value, &ROOT)
}

/// Encodes a record into a [`Value`] tree.
pub fn encode_value<T: Encode + ?Sized>(record: &T) -> Result<Value, EncodeError> {
    record.encode()
}

/// Parses wire bytes and decodes a record out of them.
pub fn from_json<T: Decode>(bytes: &[u8]) -> Result<T, Error> {
    let value = parse(bytes)?;
    Ok(decode_value(&value)?)
}

/// Encodes a record and serializes it to wire bytes.
pub fn to_json<T: Encode + ?Sized>(record: &T) -> Result<Vec<u8>, Error> {
    let value = record.encode()?;
    Ok(serialize(&value)?)
}

// =============================================================================
// PRIMITIVE IMPLS
// =============================================================================

fn mismatch(path: &Path<'_>, expected: Kind, found: &Value) -> DecodeError {
    DecodeError::TypeMismatch {
        path: path.render(),
        expected,
        found: found.kind(),
    }
}

impl Decode for String {
    /// A string field only accepts a wire string — a wire number is a
    /// mismatch, never silently formatted.
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(path, Kind::String, other)),
        }
    }
}

impl Decode for bool {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(path, Kind::Bool, other)),
        }
    }
}

impl Decode for i64 {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| DecodeError::NumberOutOfRange {
                path: path.render(),
            }),
            other => Err(mismatch(path, Kind::Number, other)),
        }
    }
}

impl Decode for u64 {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        match value {
            Value::Number(n) => n.as_u64().ok_or_else(|| DecodeError::NumberOutOfRange {
                path: path.render(),
            }),
            other => Err(mismatch(path, Kind::Number, other)),
        }
    }
}

impl Decode for f64 {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(mismatch(path, Kind::Number, other)),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value, path: &Path<'_>) -> Result<Self, DecodeError> {
        let mut cursor = SeqCursor::bind(value, *path)?;
        let mut out = Vec::with_capacity(cursor.remaining());
        while cursor.has_next() {
            out.push(cursor.next()?);
        }
        Ok(out)
    }
}

impl Encode for String {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.clone()))
    }
}

impl Encode for str {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.to_string()))
    }
}

impl Encode for bool {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }
}

impl Encode for i64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Number(Number::Int(*self)))
    }
}

impl Encode for u64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Number(Number::UInt(*self)))
    }
}

impl Encode for f64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        if !self.is_finite() {
            return Err(EncodeError::NonFiniteNumber);
        }
        Ok(Value::Number(Number::Float(*self)))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.as_slice().encode()
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Result<Value, EncodeError> {
        let items = self
            .iter()
            .map(Encode::encode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Sequence(items))
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Result<Value, EncodeError> {
        (**self).encode()
    }
}

// Required-field behavior for every type that decodes from and encodes to
// a single node.
macro_rules! field_codec_required {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldCodec for $ty {
            fn decode_field(map: &MapAccessor<'_, '_>, key: &str) -> Result<Self, DecodeError> {
                map.required(key)
            }
            fn encode_field(&self, map: &mut MapBuilder, key: &str) -> Result<(), EncodeError> {
                map.field(key, self)
            }
        }
    )*};
}

field_codec_required!(String, bool, i64, u64, f64);

impl<T: Decode + Encode> FieldCodec for Vec<T> {
    fn decode_field(map: &MapAccessor<'_, '_>, key: &str) -> Result<Self, DecodeError> {
        map.required(key)
    }
    fn encode_field(&self, map: &mut MapBuilder, key: &str) -> Result<(), EncodeError> {
        map.field(key, self)
    }
}

impl<T: Decode + Encode> FieldCodec for Option<T> {
    fn decode_field(map: &MapAccessor<'_, '_>, key: &str) -> Result<Self, DecodeError> {
        map.optional(key)
    }
    fn encode_field(&self, map: &mut MapBuilder, key: &str) -> Result<(), EncodeError> {
        map.optional_field(key, self)
    }
}
