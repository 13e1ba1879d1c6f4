//! Structural errors raised while loading, parsing and compiling patterns.
//!
//! Nothing in here is produced by the VM: runtime anomalies halt silently.

use thiserror::Error;

/// Raised by the pattern parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raised by the short / UTF-8 encoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("number is too large")]
    TooLarge(usize),

    #[error("empty string given")]
    EmptyString,

    #[error("expected one-char string")]
    NotOneChar,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid AST")]
    InvalidAst,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Raised while splitting a pattern file into a root and its definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("missing root pattern")]
    MissingRoot,

    #[error("more than one root pattern")]
    MultipleRoots,

    #[error("reference name `{0}` must be a single character")]
    InvalidReferenceName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("invalid syllable range {min}..={max}")]
    InvalidSyllables { min: u32, max: u32 },
}
