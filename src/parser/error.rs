use std::fmt::{self, Display, Formatter};

use crate::lexer::{Token, TokenKind};

/// Raised when the token under the cursor does not match what the grammar
/// requires. Carries the offending token's coordinates and the kind the
/// parser expected.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }

    pub fn unexpected(found: &Token, expected: TokenKind) -> Self {
        Self::new(
            format!("expected {expected}, found {:?} ({:?})", found.kind, found.value),
            found.line,
            found.col,
        )
    }

    pub fn message(found: &Token, message: impl Into<String>) -> Self {
        Self::new(message.into(), found.line, found.col)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line, self.col)
    }
}

impl std::error::Error for ParseError {}
