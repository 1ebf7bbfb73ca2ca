//! Security limits for parsing untrusted input.

/// Maximum nesting depth of sequences and mappings accepted by the parser.
///
/// Parsing is recursive; without a bound, a few kilobytes of `[[[[...` would
/// overflow the stack.
pub const MAX_DEPTH: usize = 128;
