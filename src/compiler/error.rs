//! Error types shared by every stage of the pipeline.
//!
//! All compile errors are fatal: the first one encountered aborts the
//! run. Each carries the source position it was detected at so the
//! driver can print a `line:column` locator.

use std::fmt;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// A 1-based source location. `column` points at the first character
/// of the offending word or group.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum CompileError {
    /// A maximal non-whitespace run that is not one of the four
    /// keywords.
    #[error("Invalid keyword '{word}' {at}")]
    InvalidKeyword { word: String, at: Position },

    /// A bit-token run whose length is nonzero and not 7, caught when
    /// the next command begins or the input ends.
    #[error("Invalid argument {at}")]
    InvalidArgument { at: Position },

    /// A bit token appeared before any command identifier was opened.
    #[error("Extra arguments {at}")]
    ExtraArguments { at: Position },

    /// The resolved identifier matches no command table entry.
    #[error("Invalid command '{name}' {at}")]
    InvalidCommand { name: String, at: Position },

    /// An entry matched but was handed the wrong number of arguments.
    #[error("Invalid number of arguments for command '{name}' {at}")]
    InvalidArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
        at: Position,
    },
}

impl CompileError {
    /// The position the error points at, for diagnostics and tests.
    pub fn position(&self) -> Position {
        match self {
            CompileError::InvalidKeyword { at, .. }
            | CompileError::InvalidArgument { at }
            | CompileError::ExtraArguments { at }
            | CompileError::InvalidCommand { at, .. }
            | CompileError::InvalidArgumentCount { at, .. } => *at,
        }
    }
}
