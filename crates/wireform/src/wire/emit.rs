//! [`Value`]-to-wire-bytes serialization.
//!
//! Emits minimal (non-pretty) output. Mapping entries are written in
//! insertion order, so `parse` followed by `serialize` is stable.
//! Pretty-printing is a presentation concern for callers and never mutates
//! a [`Value`].

use crate::error::SerializeError;
use crate::model::{Number, Value};

/// Serializes a [`Value`] tree to wire bytes.
///
/// Fails only on non-finite floats, which the wire format cannot represent.
pub fn serialize(value: &Value) -> Result<Vec<u8>, SerializeError> {
    let mut out = Vec::with_capacity(128);
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut Vec<u8>) -> Result<(), SerializeError> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => write_number(n, out)?,
        Value::String(s) => write_string(s, out),
        Value::Sequence(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out)?;
            }
            out.push(b']');
        }
        Value::Mapping(entries) => {
            out.push(b'{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(key, out);
                out.push(b':');
                write_value(item, out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn write_number(number: &Number, out: &mut Vec<u8>) -> Result<(), SerializeError> {
    match number {
        Number::Int(i) => out.extend_from_slice(i.to_string().as_bytes()),
        Number::UInt(u) => out.extend_from_slice(u.to_string().as_bytes()),
        Number::Float(f) => {
            if !f.is_finite() {
                return Err(SerializeError::NonFiniteNumber);
            }
            // Display for f64 is the shortest representation that parses
            // back to the same value.
            let text = f.to_string();
            out.extend_from_slice(text.as_bytes());
            // Keep a float marker so re-parsing yields a float again.
            if !text.contains(['.', 'e', 'E']) {
                out.extend_from_slice(b".0");
            }
        }
    }
    Ok(())
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    let bytes = s.as_bytes();
    // Fast path: nothing needs escaping (multi-byte UTF-8 passes through).
    if bytes.iter().all(|&b| b >= 0x20 && b != b'"' && b != b'\\') {
        out.push(b'"');
        out.extend_from_slice(bytes);
        out.push(b'"');
        return;
    }
    out.push(b'"');
    let mut utf8 = [0u8; 4];
    for c in s.chars() {
        match c {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            '\u{08}' => out.extend_from_slice(b"\\b"),
            '\u{0c}' => out.extend_from_slice(b"\\f"),
            c if (c as u32) < 0x20 => {
                let text = format!("\\u{:04x}", c as u32);
                out.extend_from_slice(text.as_bytes());
            }
            c => out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()),
        }
    }
    out.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::parse::parse;

    fn emit(value: &Value) -> String {
        String::from_utf8(serialize(value).unwrap()).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(emit(&Value::Null), "null");
        assert_eq!(emit(&Value::Bool(true)), "true");
        assert_eq!(emit(&Value::Number(Number::Int(-42))), "-42");
        assert_eq!(emit(&Value::Number(Number::UInt(u64::MAX))), "18446744073709551615");
        assert_eq!(emit(&Value::String("hi".to_string())), "\"hi\"");
    }

    #[test]
    fn test_float_keeps_marker() {
        assert_eq!(emit(&Value::Number(Number::Float(1.5))), "1.5");
        assert_eq!(emit(&Value::Number(Number::Float(1.0))), "1.0");
        // A float must re-parse as a float, not collapse into an integer.
        let back = parse(b"1.0").unwrap();
        assert_eq!(back, Value::Number(Number::Float(1.0)));
        let huge = Value::Number(Number::Float(1e300));
        assert_eq!(parse(&serialize(&huge).unwrap()).unwrap(), huge);
    }

    #[test]
    fn test_non_finite_rejected() {
        let nan = Value::Number(Number::Float(f64::NAN));
        assert_eq!(serialize(&nan), Err(SerializeError::NonFiniteNumber));
        let inf = Value::Sequence(vec![Value::Number(Number::Float(f64::INFINITY))]);
        assert_eq!(serialize(&inf), Err(SerializeError::NonFiniteNumber));
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            emit(&Value::String("a\"b\\c\n\u{01}".to_string())),
            r#""a\"b\\c\n\u0001""#
        );
        assert_eq!(emit(&Value::String("A\u{e9}".to_string())), "\"A\u{e9}\"");
    }

    #[test]
    fn test_structure_and_order() {
        let v = Value::Mapping(vec![
            (
                "b".to_string(),
                Value::Sequence(vec![Value::Number(Number::Int(1)), Value::Null]),
            ),
            ("a".to_string(), Value::Bool(false)),
        ]);
        assert_eq!(emit(&v), r#"{"b":[1,null],"a":false}"#);
        // Idempotent re-serialization.
        assert_eq!(parse(emit(&v).as_bytes()).unwrap(), v);
    }
}
