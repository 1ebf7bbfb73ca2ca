//! Container accessors: cursors bound to a single [`Value`] node.
//!
//! Decoding accessors ([`MapAccessor`], [`SeqCursor`]) are read-only views
//! over a parsed tree. Encoding builders ([`MapBuilder`], [`SeqBuilder`])
//! accumulate entries into a fresh [`Value`]. An accessor is created when
//! descending into a nested field and dropped once that field is fully
//! processed; nothing is shared across decodes of different roots.

use rustc_hash::FxHashMap;

use crate::codec::{Decode, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Path, Value};

// =============================================================================
// DECODING
// =============================================================================

/// Read cursor over one mapping node.
///
/// Keyed reads are non-destructive; the ordered key set is exposed for
/// dynamic-key and introspection code.
#[derive(Debug, Clone, Copy)]
pub struct MapAccessor<'v, 'p> {
    entries: &'v [(String, Value)],
    path: Path<'p>,
}

impl<'v, 'p> MapAccessor<'v, 'p> {
    /// Binds an accessor to a value, failing unless it is a mapping.
    pub fn bind(value: &'v Value, path: Path<'p>) -> Result<Self, DecodeError> {
        match value {
            Value::Mapping(entries) => Ok(Self { entries, path }),
            other => Err(DecodeError::NotAMapping {
                path: path.render(),
                found: other.kind(),
            }),
        }
    }

    /// The keys actually present, in wire order.
    pub fn keys(&self) -> impl Iterator<Item = &'v str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw access to the value under a key, if present.
    pub fn get(&self, key: &str) -> Option<&'v Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Decodes a required field. Absence is [`DecodeError::MissingKey`];
    /// a present key of the wrong shape fails with the key's path.
    pub fn required<T: Decode>(&self, key: &str) -> Result<T, DecodeError> {
        let child = self.path.key(key);
        match self.get(key) {
            Some(value) => T::decode(value, &child),
            None => Err(DecodeError::MissingKey {
                path: child.render(),
            }),
        }
    }

    /// Decodes an optional field. An absent key yields `None`; a present
    /// key of the wrong shape still fails.
    pub fn optional<T: Decode>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        let child = self.path.key(key);
        match self.get(key) {
            Some(value) => Ok(Some(T::decode(value, &child)?)),
            None => Ok(None),
        }
    }

    /// Descends into a nested mapping.
    pub fn nested_map<'s>(&'s self, key: &'s str) -> Result<MapAccessor<'v, 's>, DecodeError> {
        let child = self.path.key(key);
        match self.get(key) {
            Some(value) => MapAccessor::bind(value, child),
            None => Err(DecodeError::MissingKey {
                path: child.render(),
            }),
        }
    }

    /// Descends into a nested sequence, yielding a forward-only cursor.
    pub fn nested_seq<'s>(&'s self, key: &'s str) -> Result<SeqCursor<'v, 's>, DecodeError> {
        let child = self.path.key(key);
        match self.get(key) {
            Some(value) => SeqCursor::bind(value, child),
            None => Err(DecodeError::MissingKey {
                path: child.render(),
            }),
        }
    }
}

/// Forward-only read cursor over one sequence node.
///
/// Consumed exactly once: there is no way to rewind or re-read an element.
#[derive(Debug)]
pub struct SeqCursor<'v, 'p> {
    items: &'v [Value],
    pos: usize,
    path: Path<'p>,
}

impl<'v, 'p> SeqCursor<'v, 'p> {
    /// Binds a cursor to a value, failing unless it is a sequence.
    pub fn bind(value: &'v Value, path: Path<'p>) -> Result<Self, DecodeError> {
        match value {
            Value::Sequence(items) => Ok(Self {
                items,
                pos: 0,
                path,
            }),
            other => Err(DecodeError::NotASequence {
                path: path.render(),
                found: other.kind(),
            }),
        }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.items.len()
    }

    /// Number of elements not yet consumed.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    /// Decodes the next element and advances.
    pub fn next<T: Decode>(&mut self) -> Result<T, DecodeError> {
        let index = self.pos;
        match self.items.get(index) {
            Some(value) => {
                self.pos += 1;
                T::decode(value, &self.path.index(index))
            }
            None => Err(DecodeError::SequenceExhausted {
                path: self.path.render(),
            }),
        }
    }

    /// Opens the next element as a mapping and advances, for per-element
    /// custom handling.
    pub fn next_map<'s>(&'s mut self) -> Result<MapAccessor<'v, 's>, DecodeError> {
        let index = self.pos;
        match self.items.get(index) {
            Some(value) => {
                self.pos += 1;
                MapAccessor::bind(value, self.path.index(index))
            }
            None => Err(DecodeError::SequenceExhausted {
                path: self.path.render(),
            }),
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Write cursor accumulating entries of a mapping under construction.
///
/// Writing a key that is already present replaces its value (last write
/// wins) while keeping the first insertion's position, so output key order
/// stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    entries: Vec<(String, Value)>,
    index: FxHashMap<String, usize>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes a required field under the given key.
    pub fn field<T: Encode + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        let encoded = value.encode()?;
        self.put(key, encoded);
        Ok(())
    }

    /// Encodes an optional field. `None` omits the key entirely — no key
    /// in the output, never a null. Distinct from encoding a present empty
    /// value, which writes the key.
    pub fn optional_field<T: Encode>(
        &mut self,
        key: &str,
        value: &Option<T>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(inner) => self.field(key, inner),
            None => Ok(()),
        }
    }

    /// Builds a nested mapping under the given key.
    pub fn nested_map(
        &mut self,
        key: &str,
        build: impl FnOnce(&mut MapBuilder) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        let mut child = MapBuilder::new();
        build(&mut child)?;
        self.put(key, child.build());
        Ok(())
    }

    /// Builds a nested sequence under the given key.
    pub fn nested_seq(
        &mut self,
        key: &str,
        build: impl FnOnce(&mut SeqBuilder) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        let mut child = SeqBuilder::new();
        build(&mut child)?;
        self.put(key, child.build());
        Ok(())
    }

    /// Inserts a pre-built value, replacing any existing entry for the key.
    pub fn put(&mut self, key: &str, value: Value) {
        if let Some(&at) = self.index.get(key) {
            self.entries[at].1 = value;
        } else {
            self.index.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), value));
        }
    }

    /// Finishes the mapping.
    pub fn build(self) -> Value {
        Value::Mapping(self.entries)
    }
}

/// Write cursor accumulating elements of a sequence under construction.
#[derive(Debug, Clone, Default)]
pub struct SeqBuilder {
    items: Vec<Value>,
}

impl SeqBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes and appends an element.
    pub fn push<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(value.encode()?);
        Ok(())
    }

    /// Appends a pre-built value.
    pub fn push_value(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Builds a mapping element in place, for custom per-element shapes.
    pub fn nested_map(
        &mut self,
        build: impl FnOnce(&mut MapBuilder) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        let mut child = MapBuilder::new();
        build(&mut child)?;
        self.items.push(child.build());
        Ok(())
    }

    /// Finishes the sequence.
    pub fn build(self) -> Value {
        Value::Sequence(self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, Number, ROOT};
    use crate::wire::parse;

    fn fixture() -> Value {
        parse(br#"{"id":"109","tags":["a","b"],"shape":{"weight":"100"},"count":3}"#)
            .unwrap()
    }

    #[test]
    fn test_keys_in_wire_order() {
        let value = fixture();
        let map = MapAccessor::bind(&value, ROOT).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["id", "tags", "shape", "count"]);
        assert_eq!(map.len(), 4);
        assert!(map.contains_key("shape"));
        assert!(!map.contains_key("missing"));
    }

    #[test]
    fn test_required_and_optional() {
        let value = fixture();
        let map = MapAccessor::bind(&value, ROOT).unwrap();
        let id: String = map.required("id").unwrap();
        assert_eq!(id, "109");
        assert_eq!(map.optional::<String>("missing").unwrap(), None);

        let err = map.required::<String>("missing").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingKey {
                path: "$.missing".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_shape_fails_even_when_optional() {
        let value = fixture();
        let map = MapAccessor::bind(&value, ROOT).unwrap();
        let err = map.optional::<String>("count").unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                path: "$.count".to_string(),
                expected: Kind::String,
                found: Kind::Number,
            }
        );
    }

    #[test]
    fn test_nested_descent_and_paths() {
        let value = fixture();
        let map = MapAccessor::bind(&value, ROOT).unwrap();
        let shape = map.nested_map("shape").unwrap();
        let weight: String = shape.required("weight").unwrap();
        assert_eq!(weight, "100");

        let err = shape.required::<String>("height").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingKey {
                path: "$.shape.height".to_string()
            }
        );

        let err = map.nested_map("id").unwrap_err();
        assert!(matches!(err, DecodeError::NotAMapping { ref path, .. } if path == "$.id"));
        let err = map.nested_seq("id").unwrap_err();
        assert!(matches!(err, DecodeError::NotASequence { ref path, .. } if path == "$.id"));
    }

    #[test]
    fn test_seq_cursor_is_forward_only() {
        let value = fixture();
        let map = MapAccessor::bind(&value, ROOT).unwrap();
        let mut tags = map.nested_seq("tags").unwrap();
        assert!(tags.has_next());
        assert_eq!(tags.remaining(), 2);
        assert_eq!(tags.next::<String>().unwrap(), "a");
        assert_eq!(tags.next::<String>().unwrap(), "b");
        assert!(!tags.has_next());
        let err = tags.next::<String>().unwrap_err();
        assert_eq!(
            err,
            DecodeError::SequenceExhausted {
                path: "$.tags".to_string()
            }
        );
    }

    #[test]
    fn test_builder_symmetry() {
        let mut map = MapBuilder::new();
        map.field("id", "109").unwrap();
        map.nested_seq("tags", |seq| {
            seq.push("a")?;
            seq.push("b")
        })
        .unwrap();
        map.nested_map("shape", |m| m.field("weight", "100")).unwrap();
        map.field("count", &3i64).unwrap();
        assert_eq!(map.build(), fixture());
    }

    #[test]
    fn test_optional_absence_omits_key() {
        let mut map = MapBuilder::new();
        map.field("name", "Merry").unwrap();
        map.optional_field::<String>("email", &None).unwrap();
        map.optional_field("note", &Some(String::new())).unwrap();
        let value = map.build();
        assert_eq!(value.get("email"), None);
        // Present-but-empty still writes the key.
        assert_eq!(value.get("note"), Some(&Value::String(String::new())));
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut map = MapBuilder::new();
        map.field("a", &1i64).unwrap();
        map.field("b", &2i64).unwrap();
        map.field("a", &9i64).unwrap();
        assert_eq!(
            map.build(),
            Value::Mapping(vec![
                ("a".to_string(), Value::Number(Number::Int(9))),
                ("b".to_string(), Value::Number(Number::Int(2))),
            ])
        );
    }
}
