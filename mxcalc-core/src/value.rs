//! Runtime values in the calculator
//!
//! A value is either a scalar, a matrix, or the L/U pair produced by the
//! decomposition operation. The evaluator dispatches every operator over
//! this tag rather than inspecting runtime representations.

use crate::{LuFactors, Matrix};
use serde::Serialize;
use std::fmt;

/// Runtime value of an (sub-)expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Scalar(f64),
    Matrix(Matrix),
    Lu(LuFactors),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_lu(&self) -> Option<&LuFactors> {
        match self {
            Value::Lu(lu) => Some(lu),
            _ => None,
        }
    }

    /// Kind name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Matrix(_) => "matrix",
            Value::Lu(_) => "LU decomposition",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{}", x),
            Value::Matrix(m) => write!(f, "{}", m),
            Value::Lu(lu) => write!(f, "{}", lu),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl From<LuFactors> for Value {
    fn from(lu: LuFactors) -> Self {
        Value::Lu(lu)
    }
}
