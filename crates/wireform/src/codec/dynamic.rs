//! Dynamic-key adapter: wire objects whose keys are data.
//!
//! Some wire objects use their keys as values — a mapping from product
//! name to product attributes, say — instead of a fixed schema. The
//! adapter iterates the keys a [`MapAccessor`] actually holds, decodes a
//! fixed-shape inner record under each one, and lifts the key into the
//! record's name field. Encoding runs the same mapping in reverse,
//! re-deriving each wire key from the record.

use crate::codec::access::{MapAccessor, MapBuilder};
use crate::error::{DecodeError, EncodeError};
use crate::model::Value;

/// A record stored under a data-bearing wire key.
pub trait DynamicRecord: Sized {
    /// The wire key this record serializes under.
    fn key(&self) -> &str;

    /// Decodes the inner fields, with the wire key supplied alongside.
    fn decode_entry(key: &str, map: &MapAccessor<'_, '_>) -> Result<Self, DecodeError>;

    /// Encodes the inner fields (everything except the key).
    fn encode_entry(&self, map: &mut MapBuilder) -> Result<(), EncodeError>;
}

/// Decodes every entry of a dynamic-key mapping, in wire order.
pub fn decode_dynamic<T: DynamicRecord>(
    map: &MapAccessor<'_, '_>,
) -> Result<Vec<T>, DecodeError> {
    let mut out = Vec::with_capacity(map.len());
    for key in map.keys() {
        let inner = map.nested_map(key)?;
        out.push(T::decode_entry(key, &inner)?);
    }
    Ok(out)
}

/// Encodes records into a dynamic-key mapping, deriving each key from the
/// record. If two records derive the same key, the last write wins.
pub fn encode_dynamic<T: DynamicRecord>(records: &[T]) -> Result<Value, EncodeError> {
    let mut map = MapBuilder::new();
    for record in records {
        let mut inner = MapBuilder::new();
        record.encode_entry(&mut inner)?;
        map.put(record.key(), inner.build());
    }
    Ok(map.build())
}
