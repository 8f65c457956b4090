//! Shape preconditions shared by the kernels

use mxcalc_core::{CalcError, Matrix};

/// Require two matrices to have identical shapes.
pub fn check_same_dims(a: &Matrix, b: &Matrix, op: &'static str) -> Result<(), CalcError> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return Err(CalcError::DimensionMismatch {
            op,
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        });
    }
    Ok(())
}

/// Require `a.cols == b.rows` for a matrix product.
pub fn check_mul_dims(a: &Matrix, b: &Matrix, op: &'static str) -> Result<(), CalcError> {
    if a.cols() != b.rows() {
        return Err(CalcError::DimensionMismatch {
            op,
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        });
    }
    Ok(())
}

/// Require a square matrix.
pub fn check_square(m: &Matrix, op: &'static str) -> Result<(), CalcError> {
    if !m.is_square() {
        return Err(CalcError::NotSquare {
            op,
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    Ok(())
}
