//! Error types shared by all grado crates.

use std::fmt;

/// Errors produced while building algebras or constructing multivectors.
#[derive(Debug, thiserror::Error)]
pub enum GradoError {
    #[error("invalid algebra: {0}")]
    InvalidAlgebra(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("coordinate count mismatch: group usage needs {expected} coordinates, got {got}")]
    CoordinateCount { expected: usize, got: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What went wrong while parsing a multivector expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that starts no token.
    BadCharacter,
    /// A number with an exponent marker but no exponent digits.
    BadNumber,
    /// An identifier that is not one of the algebra's basis vectors.
    BadIdentifier,
    /// A second or later term that is not preceded by `+` or `-`.
    ExpectedSign,
    /// `*` or `^` not followed by a basis vector.
    ExpectedBasisVector,
    /// A token that cannot start a term.
    UnexpectedToken,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::BadCharacter => "Bad character",
            ParseErrorKind::BadNumber => "Bad number",
            ParseErrorKind::BadIdentifier => "Bad identifier",
            ParseErrorKind::ExpectedSign => "Expected '+' or '-'",
            ParseErrorKind::ExpectedBasisVector => "Expected basis vector",
            ParseErrorKind::UnexpectedToken => "Unexpected token",
        };
        f.write_str(msg)
    }
}

/// A parse failure with a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {source_name}, line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    /// Name of the parsed source ("string" for anonymous input).
    pub source_name: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize, source_name: &str) -> Self {
        Self {
            kind,
            line,
            column,
            source_name: source_name.to_string(),
        }
    }
}
