//! Error types for composition and query compilation
//!
//! Parsing never fails with an error: malformed notation or query text simply
//! yields nothing. The types here cover the strict side of the library:
//!
//! - [`ComposeError`] - a structured value cannot be written back as text
//! - [`RangeError`] - an interval handed to the range compiler is unusable
//! - [`QueryError`] - compiling or executing a query program failed

use thiserror::Error;

/// Errors raised by the range compiler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// `min` is greater than `max`. Valid query text never produces this for
    /// coordinates; symbol ranges are only checked here, not while parsing.
    #[error("range start {min} is greater than range end {max}")]
    Inverted { min: String, max: String },
    /// A bound is not a three digit number in the requested base.
    #[error("invalid range bound '{value}'")]
    InvalidDigit { value: String },
}

/// Errors raised while composing text from structured values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),
    #[error("invalid range bound '{0}'")]
    InvalidRange(String),
    #[error("coordinate {x}x{y} is outside the notation")]
    InvalidCoord { x: i32, y: i32 },
    #[error("invalid box marker '{0}'")]
    InvalidBox(char),
    /// An OR-group needs at least two members to be written as one.
    #[error("OR-group with {0} member(s); at least two are required")]
    OrGroupTooSmall(usize),
    #[error("prefix parts are present but empty")]
    EmptyPrefix,
    /// The assembled text does not match the grammar as a whole.
    #[error("composed text '{0}' does not match the grammar")]
    Grammar(String),
}

/// Errors raised while compiling or running a query program.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("compiled query stage is not a valid regex: {0}")]
    Regex(#[from] regex::Error),
}

/// Result alias for query compilation and execution.
pub type QueryResult<T> = Result<T, QueryError>;
