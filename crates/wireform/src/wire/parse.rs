//! Wire-bytes-to-[`Value`] parsing.
//!
//! A hand-written recursive-descent reader over a byte cursor. The reader
//! is strict where round-trip fidelity demands it: duplicate mapping keys
//! are rejected, integers are preserved exactly, and trailing bytes after
//! the top-level value are an error.

use rustc_hash::FxHashSet;

use crate::error::ParseError;
use crate::limits::MAX_DEPTH;
use crate::model::{Number, Value};

/// Parses wire bytes into a [`Value`] tree.
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let value = parser.read_value(0)?;
    parser.skip_whitespace();
    if parser.pos < parser.data.len() {
        return Err(ParseError::TrailingData { offset: parser.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn peek(&self) -> Result<u8, ParseError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(ParseError::UnexpectedEof { offset: self.pos })
    }

    fn unexpected(&self, at: usize) -> ParseError {
        match self.data.get(at) {
            Some(&b) => ParseError::UnexpectedChar {
                offset: at,
                found: b as char,
            },
            None => ParseError::UnexpectedEof { offset: at },
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.peek()? != byte {
            return Err(self.unexpected(self.pos));
        }
        self.pos += 1;
        Ok(())
    }

    fn read_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        match self.peek()? {
            b'"' => Ok(Value::String(self.read_string()?)),
            b'{' => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::DepthExceeded { max: MAX_DEPTH });
                }
                self.read_mapping(depth + 1)
            }
            b'[' => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::DepthExceeded { max: MAX_DEPTH });
                }
                self.read_sequence(depth + 1)
            }
            b'n' => self.read_keyword(b"null", Value::Null),
            b't' => self.read_keyword(b"true", Value::Bool(true)),
            b'f' => self.read_keyword(b"false", Value::Bool(false)),
            b'-' | b'0'..=b'9' => self.read_number(),
            _ => Err(self.unexpected(self.pos)),
        }
    }

    fn read_keyword(&mut self, word: &'static [u8], value: Value) -> Result<Value, ParseError> {
        let end = self.pos + word.len();
        if end > self.data.len() || &self.data[self.pos..end] != word {
            return Err(self.unexpected(self.pos));
        }
        self.pos = end;
        Ok(value)
    }

    fn read_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let data = self.data;
        let len = data.len();
        let mut x = self.pos;

        if x < len && data[x] == b'-' {
            x += 1;
        }
        let int_start = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == int_start {
            return Err(ParseError::InvalidNumber { offset: start });
        }

        let mut is_float = false;
        if x < len && data[x] == b'.' {
            is_float = true;
            x += 1;
            let frac_start = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == frac_start {
                return Err(ParseError::InvalidNumber { offset: start });
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            is_float = true;
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            let exp_start = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == exp_start {
                return Err(ParseError::InvalidNumber { offset: start });
            }
        }
        self.pos = x;

        // The scanned range is pure ASCII.
        let text = std::str::from_utf8(&data[start..x])
            .map_err(|_| ParseError::InvalidNumber { offset: start })?;

        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::Number(Number::Int(i)));
            }
            if let Ok(u) = text.parse::<u64>() {
                return Ok(Value::Number(Number::UInt(u)));
            }
            // Integers beyond u64 fall back to f64.
        }
        let f: f64 = text
            .parse()
            .map_err(|_| ParseError::InvalidNumber { offset: start })?;
        if !f.is_finite() {
            return Err(ParseError::InvalidNumber { offset: start });
        }
        Ok(Value::Number(Number::Float(f)))
    }

    /// Reads a quoted string. Expects the opening quote at the cursor.
    fn read_string(&mut self) -> Result<String, ParseError> {
        self.expect(b'"')?;
        let body_start = self.pos;
        let body_end = self.find_string_end(body_start)?;
        let body = &self.data[body_start..body_end];
        self.pos = body_end + 1;

        if !body.contains(&b'\\') {
            return std::str::from_utf8(body)
                .map(str::to_string)
                .map_err(|_| ParseError::InvalidUtf8 { offset: body_start });
        }
        unescape(body, body_start)
    }

    /// Returns the index of the closing quote, honoring backslash escapes.
    fn find_string_end(&self, mut x: usize) -> Result<usize, ParseError> {
        let data = self.data;
        while x < data.len() {
            match data[x] {
                b'"' => return Ok(x),
                b'\\' => x += 2,
                _ => x += 1,
            }
        }
        Err(ParseError::UnexpectedEof {
            offset: data.len(),
        })
    }

    fn read_sequence(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek()? == b']' {
            self.pos += 1;
            return Ok(Value::Sequence(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.read_value(depth)?);
            self.skip_whitespace();
            match self.peek()? {
                b',' => self.pos += 1,
                b']' => {
                    self.pos += 1;
                    return Ok(Value::Sequence(items));
                }
                _ => return Err(self.unexpected(self.pos)),
            }
        }
    }

    fn read_mapping(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.expect(b'{')?;
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        self.skip_whitespace();
        if self.peek()? == b'}' {
            self.pos += 1;
            return Ok(Value::Mapping(entries));
        }
        loop {
            self.skip_whitespace();
            let key_offset = self.pos;
            if self.peek()? != b'"' {
                return Err(self.unexpected(self.pos));
            }
            let key = self.read_string()?;
            if !seen.insert(key.clone()) {
                return Err(ParseError::DuplicateKey {
                    key,
                    offset: key_offset,
                });
            }
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.read_value(depth)?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.peek()? {
                b',' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    return Ok(Value::Mapping(entries));
                }
                _ => return Err(self.unexpected(self.pos)),
            }
        }
    }
}

/// Decodes a string body (between the quotes) containing escape sequences.
///
/// Delegates to serde_json, which handles `\uXXXX` and surrogate pairs
/// correctly.
fn unescape(body: &[u8], offset: usize) -> Result<String, ParseError> {
    let mut quoted = Vec::with_capacity(body.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(body);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).map_err(|_| ParseError::InvalidEscape { offset })
}
