//! Source positions

use std::fmt;

/// A 1-based line/column position in the source text.
///
/// Every token and AST node carries the span of its first character,
/// which is what errors report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Line number, starting at 1
    pub line: u32,

    /// Column number, starting at 1
    pub column: u32,
}

impl Span {
    /// Create a span at the given line and column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
