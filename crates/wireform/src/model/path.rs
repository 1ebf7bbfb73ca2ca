//! Key paths for decode diagnostics.
//!
//! A [`Path`] is a parent-linked chain of segments built as accessors
//! descend through a value tree. It is rendered to a string only when an
//! error is reported, so successful decodes never allocate for it.

use std::fmt;
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

/// A position in a value tree, rendered like `$.friends[1].bodyShape`.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    parent: Option<&'a Path<'a>>,
    segment: Segment<'a>,
}

/// The root of a value tree, rendered as `$`.
pub const ROOT: Path<'static> = Path {
    parent: None,
    segment: Segment::Root,
};

impl Path<'_> {
    /// Extends the path with a mapping key.
    pub fn key<'s>(&'s self, key: &'s str) -> Path<'s> {
        Path {
            parent: Some(self),
            segment: Segment::Key(key),
        }
    }

    /// Extends the path with a sequence index.
    pub fn index<'s>(&'s self, index: usize) -> Path<'s> {
        Path {
            parent: Some(self),
            segment: Segment::Index(index),
        }
    }

    /// Renders the full path to a string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        if let Some(parent) = self.parent {
            parent.write_to(out);
        }
        match self.segment {
            Segment::Root => out.push('$'),
            Segment::Key(k) => {
                out.push('.');
                out.push_str(k);
            }
            Segment::Index(i) => {
                // Writing to a String cannot fail.
                let _ = write!(out, "[{i}]");
            }
        }
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_root() {
        assert_eq!(ROOT.render(), "$");
    }

    #[test]
    fn test_render_nested() {
        let user = ROOT.key("userInfo");
        let friends = user.key("friends");
        let first = friends.index(1);
        let shape = first.key("bodyShape");
        assert_eq!(shape.render(), "$.userInfo.friends[1].bodyShape");
    }
}
