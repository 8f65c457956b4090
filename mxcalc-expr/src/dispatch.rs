//! Named operation dispatch
//!
//! Resolves function names (with their short aliases) to a closed set of
//! operations and applies them to a `Value`. The matching is closed on
//! purpose: an unknown name is an error at parse time, not a silent no-op.

use mxcalc_core::{CalcError, Matrix, Value};
use mxcalc_linalg::{analysis, elementwise, ScalarFn};

/// Every named operation an expression can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Transpose,
    Trace,
    Determinant,
    Inverse,
    Cofactor,
    Adjoint,
    Ref,
    Rank,
    Lu,
    Map(ScalarFn),
}

impl Operation {
    /// Case-insensitive lookup, including the short aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "transpose" => Some(Self::Transpose),
            "trc" | "trace" => Some(Self::Trace),
            "det" | "determinant" => Some(Self::Determinant),
            "inv" | "inverse" => Some(Self::Inverse),
            "cof" | "cofactor" => Some(Self::Cofactor),
            "adj" | "adjoint" => Some(Self::Adjoint),
            "ref" => Some(Self::Ref),
            "rank" => Some(Self::Rank),
            "lu" | "lu-decomposition" => Some(Self::Lu),
            other => ScalarFn::parse(other).map(Self::Map),
        }
    }

    fn apply_to_matrix(&self, m: &Matrix) -> Result<Value, CalcError> {
        match self {
            Self::Transpose => Ok(analysis::transpose(m).into()),
            Self::Trace => Ok(analysis::trace(m)?.into()),
            Self::Determinant => Ok(analysis::determinant(m)?.into()),
            Self::Inverse => Ok(analysis::inverse(m)?.into()),
            Self::Cofactor => Ok(analysis::cofactor_matrix(m)?.into()),
            Self::Adjoint => Ok(analysis::adjoint(m)?.into()),
            Self::Ref => Ok(analysis::row_echelon_form(m).into()),
            Self::Rank => Ok((analysis::rank(m) as f64).into()),
            Self::Lu => Ok(analysis::lu_decomposition(m)?.into()),
            Self::Map(f) => Ok(elementwise::map(*f, m)?.into()),
        }
    }
}

/// Apply a named operation to a value.
///
/// Scalars only accept the element-wise functions; a matrix-only name on a
/// scalar is `UnsupportedForScalar`, not `UnknownFunction`, so the message
/// points at the operand rather than the spelling.
pub fn perform(name: &str, value: &Value) -> Result<Value, CalcError> {
    match value {
        Value::Scalar(x) => match Operation::parse(name) {
            Some(Operation::Map(f)) => Ok(f.apply(*x)?.into()),
            Some(_) => Err(CalcError::UnsupportedForScalar(name.to_string())),
            None => Err(CalcError::UnknownFunction(name.to_string())),
        },
        Value::Matrix(m) => Operation::parse(name)
            .ok_or_else(|| CalcError::UnknownFunction(name.to_string()))?
            .apply_to_matrix(m),
        Value::Lu(_) => Err(CalcError::InvalidOperands {
            op: '(',
            left: value.type_name(),
            right: "a named operation",
        }),
    }
}

/// Integer matrix power.
///
/// `A^0` is the identity, positive powers are repeated multiplication, and
/// negative powers go through the inverse (so a singular base surfaces
/// `Singular`). Non-integer exponents are rejected rather than rounded.
pub fn matrix_power(a: &Matrix, n: f64) -> Result<Matrix, CalcError> {
    if !a.is_square() {
        return Err(CalcError::NotSquare {
            op: "power",
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    if n.fract() != 0.0 {
        return Err(CalcError::InvalidExponent(n));
    }

    if n == 0.0 {
        return Ok(Matrix::identity(a.rows()));
    }

    let base = if n > 0.0 {
        a.clone()
    } else {
        analysis::inverse(a)?
    };
    let steps = n.abs() as u32;
    let mut result = base.clone();
    for _ in 1..steps {
        result = mxcalc_linalg::arithmetic::multiply(&result, &base)?;
    }
    Ok(result)
}
