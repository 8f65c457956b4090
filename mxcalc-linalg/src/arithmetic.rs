//! Entry-wise and product arithmetic

use crate::checks::{check_mul_dims, check_same_dims};
use mxcalc_core::{CalcError, Matrix};

/// Entry-wise sum of two matrices of identical shape.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, CalcError> {
    check_same_dims(a, b, "add")?;
    combine(a, b, |x, y| x + y)
}

/// Entry-wise difference of two matrices of identical shape.
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, CalcError> {
    check_same_dims(a, b, "subtract")?;
    combine(a, b, |x, y| x - y)
}

/// Standard matrix product; requires `a.cols == b.rows`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, CalcError> {
    check_mul_dims(a, b, "multiply")?;

    let mut data = vec![vec![0.0; b.cols()]; a.rows()];
    let a_rows = a.to_rows();
    let b_rows = b.to_rows();
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let mut acc = 0.0;
            for k in 0..a.cols() {
                acc += a_rows[i][k] * b_rows[k][j];
            }
            data[i][j] = acc;
        }
    }
    Matrix::from_rows(data)
}

/// Every entry multiplied by `k`. Always succeeds.
pub fn scalar_multiply(k: f64, a: &Matrix) -> Matrix {
    a.map(|x| k * x)
}

fn combine(a: &Matrix, b: &Matrix, f: impl Fn(f64, f64) -> f64) -> Result<Matrix, CalcError> {
    let data = a
        .row_slices()
        .zip(b.row_slices())
        .map(|(ra, rb)| ra.iter().zip(rb).map(|(&x, &y)| f(x, y)).collect())
        .collect();
    Matrix::from_rows(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(data).unwrap()
    }

    #[test]
    fn test_add() {
        let a = m(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let b = m(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let sum = add(&a, &b).unwrap();
        assert_eq!(sum, m(vec![vec![2.0, 1.0], vec![1.0, 2.0]]));
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        assert!(matches!(
            add(&a, &b),
            Err(CalcError::DimensionMismatch { op: "add", .. })
        ));
    }

    #[test]
    fn test_subtract() {
        let a = m(vec![vec![3.0, 4.0]]);
        let b = m(vec![vec![1.0, 2.0]]);
        assert_eq!(subtract(&a, &b).unwrap(), m(vec![vec![2.0, 2.0]]));
    }

    #[test]
    fn test_multiply() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        let prod = multiply(&a, &b).unwrap();
        assert_eq!(prod, m(vec![vec![19.0, 22.0], vec![43.0, 50.0]]));
    }

    #[test]
    fn test_multiply_rect() {
        let a = m(vec![vec![1.0, 2.0, 3.0]]);
        let b = m(vec![vec![4.0], vec![5.0], vec![6.0]]);
        let prod = multiply(&a, &b).unwrap();
        assert_eq!(prod, m(vec![vec![32.0]]));
    }

    #[test]
    fn test_multiply_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert!(multiply(&a, &b).is_err());
    }

    #[test]
    fn test_scalar_multiply() {
        let a = m(vec![vec![1.0, -2.0]]);
        assert_eq!(scalar_multiply(3.0, &a), m(vec![vec![3.0, -6.0]]));
    }
}
