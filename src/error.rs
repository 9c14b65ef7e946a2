//! Top-level error type uniting the four pipeline stage errors.
//!
//! Each stage (lexer, parser, compiler, VM) raises its own error type so
//! that call sites can match on the specific kind; the driver only ever
//! needs to print a single `Error: <message>` line, so this enum exists
//! purely to let `?` flow through [`crate::run`] without the caller having
//! to match on which stage failed.

use std::fmt::{self, Display, Formatter};

use crate::compiler::CompileError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::vm::RuntimeError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Compile(CompileError),
    Runtime(RuntimeError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "{e}"),
            Error::Parse(e) => write!(f, "{e}"),
            Error::Compile(e) => write!(f, "{e}"),
            Error::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(value: LexError) -> Self {
        Error::Lex(value)
    }
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Error::Parse(value)
    }
}

impl From<CompileError> for Error {
    fn from(value: CompileError) -> Self {
        Error::Compile(value)
    }
}

impl From<RuntimeError> for Error {
    fn from(value: RuntimeError) -> Self {
        Error::Runtime(value)
    }
}
