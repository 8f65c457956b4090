//! Structured errors for the calculator engine
//!
//! Every failure below `evaluate()` is converted into one of these variants
//! and surfaces as a result, never as a panic. The engine also never hands
//! back a silently-wrong value: a scalar domain problem is an error, not NaN.

use serde::Serialize;
use thiserror::Error;

/// Machine-readable error codes, one per `CalcError` kind.
pub mod codes {
    pub const DIM_MISMATCH: &str = "DIM_MISMATCH";
    pub const NOT_SQUARE: &str = "NOT_SQUARE";
    pub const SINGULAR: &str = "SINGULAR";
    pub const INVALID_OPERANDS: &str = "INVALID_OPERANDS";
    pub const UNKNOWN_MATRIX: &str = "UNKNOWN_MATRIX";
    pub const UNKNOWN_FUNC: &str = "UNKNOWN_FUNC";
    pub const SCALAR_UNSUPPORTED: &str = "SCALAR_UNSUPPORTED";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_EXPONENT: &str = "INVALID_EXPONENT";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const INVALID_CHAR: &str = "INVALID_CHAR";
    pub const PAREN_MISMATCH: &str = "PAREN_MISMATCH";
    pub const UNEXPECTED_TOKEN: &str = "UNEXPECTED_TOKEN";
}

/// Structured error for the calculator engine.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum CalcError {
    /// Two matrices with incompatible shapes for the requested operation.
    #[error("{op}: incompatible dimensions {a_rows}x{a_cols} and {b_rows}x{b_cols}")]
    DimensionMismatch {
        op: &'static str,
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    /// A square-only operation applied to a rectangular matrix.
    #[error("{op}: requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Inversion of a matrix with zero determinant.
    #[error("{op}: matrix is singular")]
    Singular { op: &'static str },

    /// An operator applied to an unsupported value-kind pairing.
    #[error("operator '{op}' cannot combine {left} and {right}")]
    InvalidOperands {
        op: char,
        left: &'static str,
        right: &'static str,
    },

    /// Identifier with no entry in the matrix table.
    #[error("unknown matrix: {0}")]
    UnknownMatrix(String),

    /// Function name the dispatcher does not recognize.
    #[error("unknown operation: {0}")]
    UnknownFunction(String),

    /// A matrix-only operation applied to a scalar argument.
    #[error("operation '{0}' is not supported for scalars")]
    UnsupportedForScalar(String),

    #[error("division by zero")]
    DivisionByZero,

    /// Matrix exponent that is not an integer.
    #[error("matrix exponent must be an integer, got {0}")]
    InvalidExponent(f64),

    /// Input outside the domain of a scalar function (asin, log, tan poles...).
    #[error("{func}: {reason}")]
    Domain { func: &'static str, reason: String },

    /// Character the tokenizer cannot classify.
    #[error("invalid character in expression: '{0}'")]
    InvalidCharacter(char),

    #[error("mismatched parentheses: {0}")]
    MismatchedParentheses(&'static str),

    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

impl CalcError {
    /// Machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::DimensionMismatch { .. } => codes::DIM_MISMATCH,
            CalcError::NotSquare { .. } => codes::NOT_SQUARE,
            CalcError::Singular { .. } => codes::SINGULAR,
            CalcError::InvalidOperands { .. } => codes::INVALID_OPERANDS,
            CalcError::UnknownMatrix(_) => codes::UNKNOWN_MATRIX,
            CalcError::UnknownFunction(_) => codes::UNKNOWN_FUNC,
            CalcError::UnsupportedForScalar(_) => codes::SCALAR_UNSUPPORTED,
            CalcError::DivisionByZero => codes::DIV_ZERO,
            CalcError::InvalidExponent(_) => codes::INVALID_EXPONENT,
            CalcError::Domain { .. } => codes::DOMAIN_ERROR,
            CalcError::InvalidCharacter(_) => codes::INVALID_CHAR,
            CalcError::MismatchedParentheses(_) => codes::PAREN_MISMATCH,
            CalcError::UnexpectedToken(_) | CalcError::UnexpectedEnd => codes::UNEXPECTED_TOKEN,
        }
    }

    /// Shorthand for a domain failure of a named function.
    pub fn domain(func: &'static str, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            func,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = CalcError::DimensionMismatch {
            op: "add",
            a_rows: 2,
            a_cols: 3,
            b_rows: 2,
            b_cols: 2,
        };
        assert_eq!(
            err.to_string(),
            "add: incompatible dimensions 2x3 and 2x2"
        );
        assert_eq!(err.code(), codes::DIM_MISMATCH);
    }

    #[test]
    fn test_code_per_kind() {
        assert_eq!(CalcError::DivisionByZero.code(), codes::DIV_ZERO);
        assert_eq!(
            CalcError::UnknownMatrix("Q".into()).code(),
            codes::UNKNOWN_MATRIX
        );
        assert_eq!(CalcError::UnexpectedEnd.code(), codes::UNEXPECTED_TOKEN);
        assert_eq!(
            CalcError::domain("log", "input must be positive").code(),
            codes::DOMAIN_ERROR
        );
    }
}
