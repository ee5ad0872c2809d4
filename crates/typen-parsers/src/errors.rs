//! Parser error types

use typen_core::decl::SignatureError;

/// Errors raised while reading annotation or signature text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}, column {col}: {message}")]
    Syntax {
        line: usize,
        col: usize,
        message: String,
    },

    #[error("Unexpected token at line {line}, column {col}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    #[error("Unknown type name '{name}' at line {line}, column {col}")]
    UnknownName {
        line: usize,
        col: usize,
        name: String,
    },

    #[error("Invalid literal '{text}' at line {line}, column {col}")]
    InvalidLiteral {
        line: usize,
        col: usize,
        text: String,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

pub type ParseResult<T> = Result<T, ParseError>;
