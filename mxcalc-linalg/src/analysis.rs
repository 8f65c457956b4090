//! Analysis and transformation kernels
//!
//! Determinant, cofactor, adjoint, and inverse follow the classical adjugate
//! formulas with recursive cofactor expansion. Row echelon form uses
//! Gaussian elimination with first-nonzero pivoting (not magnitude-based
//! partial pivoting, a known stability limitation kept deliberately).

use crate::checks::check_square;
use mxcalc_core::{CalcError, LuFactors, Matrix, EPSILON};

/// Transpose. Empty input yields the empty matrix.
pub fn transpose(m: &Matrix) -> Matrix {
    if m.is_empty() {
        return Matrix::empty();
    }
    let rows = m.to_rows();
    let data = (0..m.cols())
        .map(|j| (0..m.rows()).map(|i| rows[i][j]).collect())
        .collect();
    Matrix::from_rows(data).unwrap_or_else(|_| Matrix::empty())
}

/// Sum of the diagonal of a square, non-empty matrix.
pub fn trace(m: &Matrix) -> Result<f64, CalcError> {
    if m.is_empty() {
        return Err(CalcError::domain("trace", "empty matrix"));
    }
    check_square(m, "trace")?;
    Ok((0..m.rows()).map(|i| m.get(i, i).unwrap_or(0.0)).sum())
}

/// Submatrix with one row and one column deleted.
pub fn minor(m: &Matrix, exclude_row: usize, exclude_col: usize) -> Matrix {
    let data = m
        .row_slices()
        .enumerate()
        .filter(|(i, _)| *i != exclude_row)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|(j, _)| *j != exclude_col)
                .map(|(_, &x)| x)
                .collect()
        })
        .collect();
    Matrix::from_rows(data).unwrap_or_else(|_| Matrix::empty())
}

/// Determinant by recursive cofactor expansion along row 0.
///
/// The 0x0 matrix returns 0 (a quirk of the engine's convention, not the
/// algebraic empty determinant of 1). Cost is O(n!) by design; this is the
/// reference path, not an optimized one.
pub fn determinant(m: &Matrix) -> Result<f64, CalcError> {
    if m.rows() == 0 {
        return Ok(0.0);
    }
    check_square(m, "determinant")?;

    let rows = m.to_rows();
    match m.rows() {
        1 => Ok(rows[0][0]),
        2 => Ok(rows[0][0] * rows[1][1] - rows[0][1] * rows[1][0]),
        n => {
            let mut det = 0.0;
            for j in 0..n {
                let sub = minor(m, 0, j);
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                det += rows[0][j] * sign * determinant(&sub)?;
            }
            Ok(det)
        }
    }
}

/// Matrix of signed minors: `C[i][j] = (-1)^(i+j) * det(minor(m, i, j))`.
pub fn cofactor_matrix(m: &Matrix) -> Result<Matrix, CalcError> {
    if m.rows() == 0 {
        return Ok(Matrix::empty());
    }
    check_square(m, "cofactor")?;

    let n = m.rows();
    let mut data = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            data[i][j] = sign * determinant(&minor(m, i, j))?;
        }
    }
    Matrix::from_rows(data)
}

/// Adjoint: transpose of the cofactor matrix.
pub fn adjoint(m: &Matrix) -> Result<Matrix, CalcError> {
    Ok(transpose(&cofactor_matrix(m)?))
}

/// Inverse via the adjugate formula. Fails `Singular` when det is exactly 0.
pub fn inverse(m: &Matrix) -> Result<Matrix, CalcError> {
    if m.rows() == 0 {
        return Ok(Matrix::empty());
    }
    check_square(m, "inverse")?;

    let det = determinant(m)?;
    if det == 0.0 {
        return Err(CalcError::Singular { op: "inverse" });
    }

    let adj = adjoint(m)?;
    Ok(adj.map(|x| x / det))
}

/// Row echelon form by Gaussian elimination.
///
/// Pivot selection takes the first row with a nonzero entry in the leading
/// column (exact `== 0` test). The pivot row is normalized to a leading 1 and
/// the column eliminated from every other row. When a column has no pivot the
/// same row is retried against the next column. After elimination every entry
/// below `EPSILON` in magnitude is snapped to exactly 0 to suppress floating
/// noise.
pub fn row_echelon_form(m: &Matrix) -> Matrix {
    if m.is_empty() {
        return Matrix::empty();
    }

    let rows = m.rows();
    let cols = m.cols();
    let mut ref_data = m.to_rows();

    let mut lead = 0;
    let mut r = 0;
    while r < rows {
        if lead >= cols {
            break;
        }

        let mut i = r;
        while i < rows && ref_data[i][lead] == 0.0 {
            i += 1;
        }

        if i < rows {
            ref_data.swap(r, i);

            let div = ref_data[r][lead];
            for j in lead..cols {
                ref_data[r][j] /= div;
            }

            for other in 0..rows {
                if other != r {
                    let mult = ref_data[other][lead];
                    for j in lead..cols {
                        ref_data[other][j] -= mult * ref_data[r][j];
                    }
                }
            }
            lead += 1;
            r += 1;
        } else {
            // No pivot in this column; retry the same row one column right.
            lead += 1;
        }
    }

    for row in &mut ref_data {
        for x in row.iter_mut() {
            if x.abs() < EPSILON {
                *x = 0.0;
            }
        }
    }

    Matrix::from_rows(ref_data).unwrap_or_else(|_| Matrix::empty())
}

/// Rank: rows of the echelon form with any entry above `EPSILON`.
pub fn rank(m: &Matrix) -> usize {
    if m.is_empty() {
        return 0;
    }
    row_echelon_form(m)
        .row_slices()
        .filter(|row| row.iter().any(|x| x.abs() > EPSILON))
        .count()
}

/// LU decomposition placeholder.
///
/// Returns `L = identity`, `U = copy of the input`. This is NOT a real
/// factorization (no elimination, no pivoting, no multiplier storage); the
/// degenerate shape is preserved intentionally because callers depend on it.
pub fn lu_decomposition(m: &Matrix) -> Result<LuFactors, CalcError> {
    if m.is_empty() {
        return Err(CalcError::domain("lu", "empty matrix"));
    }
    check_square(m, "lu")?;

    Ok(LuFactors {
        l: Matrix::identity(m.rows()),
        u: m.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::multiply;

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(data).unwrap()
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = transpose(&a);
        assert_eq!(t, m(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]));
        assert_eq!(transpose(&Matrix::empty()), Matrix::empty());
    }

    #[test]
    fn test_trace() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(trace(&a).unwrap(), 5.0);
        assert!(trace(&Matrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_determinant_base_cases() {
        assert_eq!(determinant(&Matrix::empty()).unwrap(), 0.0);
        assert_eq!(determinant(&m(vec![vec![7.0]])).unwrap(), 7.0);
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(determinant(&a).unwrap(), -2.0);
    }

    #[test]
    fn test_determinant_3x3() {
        let a = m(vec![
            vec![2.0, 0.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 1.0, 1.0],
        ]);
        // Cofactor expansion: 2*(3-2) - 0 + 1*(1-3) = 0
        assert_eq!(determinant(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_not_square() {
        assert!(matches!(
            determinant(&Matrix::zeros(2, 3)),
            Err(CalcError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_determinant_of_transpose_matches() {
        let a = m(vec![
            vec![4.0, 3.0, 2.0],
            vec![1.0, 5.0, 7.0],
            vec![2.0, 8.0, 6.0],
        ]);
        let d1 = determinant(&a).unwrap();
        let d2 = determinant(&transpose(&a)).unwrap();
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_cofactor_and_adjoint() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let cof = cofactor_matrix(&a).unwrap();
        assert_eq!(cof, m(vec![vec![4.0, -3.0], vec![-2.0, 1.0]]));
        let adj = adjoint(&a).unwrap();
        assert_eq!(adj, m(vec![vec![4.0, -2.0], vec![-3.0, 1.0]]));
    }

    #[test]
    fn test_inverse_2x2() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let inv = inverse(&a).unwrap();
        assert_eq!(inv, m(vec![vec![-2.0, 1.0], vec![1.5, -0.5]]));
    }

    #[test]
    fn test_inverse_product_is_identity() {
        let a = m(vec![
            vec![2.0, 1.0, 0.0],
            vec![0.0, 3.0, 1.0],
            vec![1.0, 0.0, 2.0],
        ]);
        let inv = inverse(&a).unwrap();
        let prod = multiply(&a, &inv).unwrap();
        let diff = prod.max_abs_diff(&Matrix::identity(3)).unwrap();
        assert!(diff < 1e-9, "max diff {}", diff);
    }

    #[test]
    fn test_inverse_singular() {
        let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(matches!(inverse(&a), Err(CalcError::Singular { .. })));
    }

    #[test]
    fn test_product_transpose_identity() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![0.0, 1.0], vec![1.0, 1.0]]);
        let left = transpose(&multiply(&a, &b).unwrap());
        let right = multiply(&transpose(&b), &transpose(&a)).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_row_echelon_form() {
        let a = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        let r = row_echelon_form(&a);
        // Rank-2 matrix: last row eliminated to zero.
        assert_eq!(
            r,
            m(vec![
                vec![1.0, 0.0, -1.0],
                vec![0.0, 1.0, 2.0],
                vec![0.0, 0.0, 0.0],
            ])
        );
    }

    #[test]
    fn test_row_echelon_form_idempotent() {
        let a = m(vec![
            vec![2.0, 4.0, 1.0],
            vec![0.0, 0.0, 3.0],
            vec![1.0, 2.0, 5.0],
        ]);
        let once = row_echelon_form(&a);
        let twice = row_echelon_form(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank() {
        assert_eq!(rank(&Matrix::identity(4)), 4);
        let singular = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert_eq!(rank(&singular), 1);
        let rect = m(vec![vec![1.0, 0.0, 2.0], vec![0.0, 1.0, 1.0]]);
        assert_eq!(rank(&rect), 2);
        assert!(rank(&rect) <= rect.rows().min(rect.cols()));
        assert_eq!(rank(&Matrix::empty()), 0);
    }

    #[test]
    fn test_lu_placeholder_shape() {
        let a = m(vec![vec![4.0, 3.0], vec![6.0, 3.0]]);
        let lu = lu_decomposition(&a).unwrap();
        assert_eq!(lu.l, Matrix::identity(2));
        assert_eq!(lu.u, a);
    }

    #[test]
    fn test_lu_requires_square() {
        assert!(lu_decomposition(&Matrix::zeros(2, 3)).is_err());
        assert!(lu_decomposition(&Matrix::empty()).is_err());
    }
}
