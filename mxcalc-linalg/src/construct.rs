//! Matrix factories
//!
//! Every factory draws from a caller-supplied [`Lcg`] so output is fully
//! reproducible from a seed. Square-only kinds given a non-square request
//! fall back to `min(rows, cols)` and report the substitution instead of
//! failing outright.

use crate::analysis::determinant;
use mxcalc_core::Matrix;

/// Seeded linear congruential generator.
///
/// Deliberately simple: reproducibility matters here, statistical quality
/// does not.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform in [0, 1) with 15 bits of resolution.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        ((self.state >> 16) & 0x7fff) as f64 / 32768.0
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize
    }

    /// Uniform in [-0.5, 0.5).
    fn centered(&mut self) -> f64 {
        self.next_f64() - 0.5
    }
}

/// The matrix shapes the engine can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Random,
    Zero,
    Identity,
    Diagonal,
    Scalar,
    Row,
    Column,
    UpperTriangular,
    LowerTriangular,
    Symmetric,
    SkewSymmetric,
    Boolean,
    Sparse,
    Hermitian,
    SkewHermitian,
    Orthogonal,
    Idempotent,
    Nilpotent,
    Involutory,
    Singular,
    NonSingular,
    Stochastic,
    RightStochastic,
    LeftStochastic,
}

impl MatrixKind {
    /// Lookup by type tag. `dense` is an alias for `random`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "random" | "dense" => Some(Self::Random),
            "zero" => Some(Self::Zero),
            "identity" => Some(Self::Identity),
            "diagonal" => Some(Self::Diagonal),
            "scalar" => Some(Self::Scalar),
            "row" => Some(Self::Row),
            "column" => Some(Self::Column),
            "upper-triangular" => Some(Self::UpperTriangular),
            "lower-triangular" => Some(Self::LowerTriangular),
            "symmetric" => Some(Self::Symmetric),
            "skew-symmetric" => Some(Self::SkewSymmetric),
            "boolean" => Some(Self::Boolean),
            "sparse" => Some(Self::Sparse),
            "hermitian" => Some(Self::Hermitian),
            "skew-hermitian" => Some(Self::SkewHermitian),
            "orthogonal" => Some(Self::Orthogonal),
            "idempotent" => Some(Self::Idempotent),
            "nilpotent" => Some(Self::Nilpotent),
            "involutory" => Some(Self::Involutory),
            "singular" => Some(Self::Singular),
            "non-singular" => Some(Self::NonSingular),
            "stochastic" => Some(Self::Stochastic),
            "right-stochastic" | "row-stochastic" => Some(Self::RightStochastic),
            "left-stochastic" | "column-stochastic" => Some(Self::LeftStochastic),
            _ => None,
        }
    }

    /// Human-readable name used in substitution messages.
    fn label(&self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Zero => "Zero",
            Self::Identity => "Identity",
            Self::Diagonal => "Diagonal",
            Self::Scalar => "Scalar",
            Self::Row => "Row",
            Self::Column => "Column",
            Self::UpperTriangular => "Upper Triangular",
            Self::LowerTriangular => "Lower Triangular",
            Self::Symmetric => "Symmetric",
            Self::SkewSymmetric => "Skew-Symmetric",
            Self::Boolean => "Boolean",
            Self::Sparse => "Sparse",
            Self::Hermitian => "Hermitian",
            Self::SkewHermitian => "Skew-Hermitian",
            Self::Orthogonal => "Orthogonal",
            Self::Idempotent => "Idempotent",
            Self::Nilpotent => "Nilpotent",
            Self::Involutory => "Involutory",
            Self::Singular => "Singular",
            Self::NonSingular => "Non-Singular",
            Self::Stochastic => "Stochastic",
            Self::RightStochastic => "Right Stochastic",
            Self::LeftStochastic => "Left Stochastic",
        }
    }

    fn requires_square(&self) -> bool {
        matches!(
            self,
            Self::Identity
                | Self::Scalar
                | Self::UpperTriangular
                | Self::LowerTriangular
                | Self::Symmetric
                | Self::SkewSymmetric
                | Self::Orthogonal
                | Self::Idempotent
                | Self::Nilpotent
                | Self::Involutory
                | Self::Singular
                | Self::NonSingular
                | Self::Stochastic
                | Self::RightStochastic
                | Self::LeftStochastic
        )
    }
}

/// A generated matrix plus an optional note about what was adjusted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCreation {
    pub data: Matrix,
    pub error_message: Option<String>,
}

/// Generate a matrix of the requested kind.
pub fn build(kind: MatrixKind, rows: usize, cols: usize, rng: &mut Lcg) -> MatrixCreation {
    if matches!(kind, MatrixKind::Hermitian | MatrixKind::SkewHermitian) {
        let size = rows.min(cols);
        return MatrixCreation {
            data: Matrix::zeros(size, size),
            error_message: Some(format!(
                "{} Matrix requires complex numbers, not supported.",
                kind.label()
            )),
        };
    }

    if kind.requires_square() && rows != cols {
        let size = rows.min(cols);
        let creation = build(kind, size, size, rng);
        let label = kind.label();
        return MatrixCreation {
            data: creation.data,
            error_message: Some(format!(
                "{} matrix must be square. Created a square {} matrix with min(rows, cols).",
                label,
                label.to_lowercase()
            )),
        };
    }

    let data = match kind {
        MatrixKind::Random => random_int(rows, cols, 10, rng),
        MatrixKind::Zero => Matrix::zeros(rows, cols),
        MatrixKind::Identity => Matrix::identity(rows),
        MatrixKind::Diagonal => diagonal(rows, cols, 1.0),
        MatrixKind::Scalar => diagonal(rows, rows, 5.0),
        MatrixKind::Row => Matrix::zeros(1, cols),
        MatrixKind::Column => Matrix::zeros(rows, 1),
        MatrixKind::UpperTriangular => {
            let mut m = random_int(rows, rows, 10, rng).into_rows();
            for (i, row) in m.iter_mut().enumerate() {
                for x in row.iter_mut().take(i) {
                    *x = 0.0;
                }
            }
            from_rows(m)
        }
        MatrixKind::LowerTriangular => {
            let mut m = random_int(rows, rows, 10, rng).into_rows();
            for (i, row) in m.iter_mut().enumerate() {
                for x in row.iter_mut().skip(i + 1) {
                    *x = 0.0;
                }
            }
            from_rows(m)
        }
        MatrixKind::Symmetric => {
            let mut m = random_int(rows, rows, 10, rng).into_rows();
            for i in 0..rows {
                for j in (i + 1)..rows {
                    m[j][i] = m[i][j];
                }
            }
            from_rows(m)
        }
        MatrixKind::SkewSymmetric => {
            let mut m = random_int(rows, rows, 10, rng).into_rows();
            for i in 0..rows {
                m[i][i] = 0.0;
                for j in (i + 1)..rows {
                    m[j][i] = -m[i][j];
                }
            }
            from_rows(m)
        }
        MatrixKind::Boolean => {
            let data = (0..rows)
                .map(|_| (0..cols).map(|_| rng.next_f64().round()).collect())
                .collect();
            from_rows(data)
        }
        MatrixKind::Sparse => sparse(rows, cols, 0.2, rng),
        MatrixKind::Orthogonal => orthogonal(rows, rng),
        MatrixKind::Idempotent => projector(rows, rng),
        MatrixKind::Nilpotent => nilpotent(rows, rng),
        MatrixKind::Involutory => reflector(rows, rng),
        MatrixKind::Singular => singular(rows, rng),
        MatrixKind::NonSingular => non_singular(rows, rng),
        MatrixKind::Stochastic | MatrixKind::RightStochastic => row_stochastic(rows, rng),
        MatrixKind::LeftStochastic => column_stochastic(rows, rng),
        MatrixKind::Hermitian | MatrixKind::SkewHermitian => unreachable!(),
    };

    MatrixCreation {
        data,
        error_message: None,
    }
}

fn from_rows(data: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(data).unwrap_or_else(|_| Matrix::empty())
}

/// Random integer entries in `0..bound`.
fn random_int(rows: usize, cols: usize, bound: usize, rng: &mut Lcg) -> Matrix {
    let data = (0..rows)
        .map(|_| (0..cols).map(|_| rng.below(bound) as f64).collect())
        .collect();
    from_rows(data)
}

fn diagonal(rows: usize, cols: usize, value: f64) -> Matrix {
    let mut data = vec![vec![0.0; cols]; rows];
    for i in 0..rows.min(cols) {
        data[i][i] = value;
    }
    from_rows(data)
}

fn sparse(rows: usize, cols: usize, density: f64, rng: &mut Lcg) -> Matrix {
    let mut data = vec![vec![0.0; cols]; rows];
    if rows == 0 || cols == 0 {
        return from_rows(data);
    }
    let target = ((rows * cols) as f64 * density) as usize;
    let mut placed = 0;
    while placed < target {
        let r = rng.below(rows);
        let c = rng.below(cols);
        if data[r][c] == 0.0 {
            data[r][c] = (rng.below(10) + 1) as f64;
            placed += 1;
        }
    }
    from_rows(data)
}

/// Gram-Schmidt over random integer rows; falls back to identity when a
/// vector collapses to (near) zero.
fn orthogonal(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    let source = random_int(size, size, 10, rng).into_rows();
    let mut ortho = vec![vec![0.0; size]; size];

    for j in 0..size {
        let mut v = source[j].clone();
        for prev in ortho.iter().take(j) {
            let proj: f64 = prev.iter().zip(&v).map(|(p, x)| p * x).sum();
            for (x, p) in v.iter_mut().zip(prev) {
                *x -= proj * p;
            }
        }
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm < 1e-10 {
            return Matrix::identity(size);
        }
        for (o, x) in ortho[j].iter_mut().zip(&v) {
            *o = x / norm;
        }
    }
    from_rows(ortho)
}

/// Projector `I - uu^T` for a random unit vector `u`. Idempotent by
/// construction.
fn projector(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    let u: Vec<f64> = (0..size).map(|_| rng.centered()).collect();
    let norm = u.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm < 1e-10 {
        return Matrix::identity(size);
    }
    let unit: Vec<f64> = u.iter().map(|x| x / norm).collect();
    let mut data = Matrix::identity(size).into_rows();
    for i in 0..size {
        for j in 0..size {
            data[i][j] -= unit[i] * unit[j];
        }
    }
    from_rows(data)
}

/// Strict upper triangular with entries 1-5; N^size = 0.
fn nilpotent(size: usize, rng: &mut Lcg) -> Matrix {
    let mut data = vec![vec![0.0; size]; size];
    for i in 0..size.saturating_sub(1) {
        for j in (i + 1)..size {
            data[i][j] = (rng.below(5) + 1) as f64;
        }
    }
    from_rows(data)
}

/// Householder reflector `I - 2uu^T / (u^T u)`; its own inverse.
fn reflector(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    let u: Vec<f64> = (0..size).map(|_| rng.centered()).collect();
    let norm_sq: f64 = u.iter().map(|x| x * x).sum();
    if norm_sq < 1e-10 {
        return Matrix::identity(size);
    }
    let mut data = Matrix::identity(size).into_rows();
    for i in 0..size {
        for j in 0..size {
            data[i][j] -= 2.0 * u[i] * u[j] / norm_sq;
        }
    }
    from_rows(data)
}

/// Random matrix made singular by replacing the last row with a linear
/// combination of the first row(s), re-drawn until the determinant confirms
/// it. The attempt cap guards against float noise on large entries.
fn singular(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    for _ in 0..100 {
        let mut data = random_int(size, size, 10, rng).into_rows();
        if size >= 2 {
            let coeff1 = rng.next_f64() * 2.0 - 1.0;
            let coeff2 = rng.next_f64() * 2.0 - 1.0;
            data[size - 1] = (0..size)
                .map(|j| {
                    if size > 2 {
                        coeff1 * data[0][j] + coeff2 * data[1][j]
                    } else {
                        coeff1 * data[0][j]
                    }
                })
                .collect();
        }
        let m = from_rows(data);
        match determinant(&m) {
            Ok(det) if det.abs() <= 1e-10 => return m,
            _ => continue,
        }
    }
    Matrix::zeros(size, size)
}

/// Random integer matrix, re-drawn until invertible; after 10 failed draws
/// falls back to a nonzero diagonal matrix.
fn non_singular(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    for _ in 0..=10 {
        let m = random_int(size, size, 10, rng);
        if let Ok(det) = determinant(&m) {
            if det.abs() >= 1e-10 {
                return m;
            }
        }
    }
    diagonal(size, size, rng.next_f64() * 9.0 + 1.0)
}

/// Random positive entries, each row normalized to sum 1.
fn row_stochastic(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    let data = (0..size)
        .map(|_| {
            let row: Vec<f64> = (0..size).map(|_| rng.next_f64()).collect();
            let sum: f64 = row.iter().sum();
            if sum > 0.0 {
                row.iter().map(|x| x / sum).collect()
            } else {
                row
            }
        })
        .collect();
    from_rows(data)
}

/// Random positive entries, each column normalized to sum 1.
fn column_stochastic(size: usize, rng: &mut Lcg) -> Matrix {
    if size == 0 {
        return Matrix::empty();
    }
    let mut data = vec![vec![0.0; size]; size];
    for j in 0..size {
        let mut sum = 0.0;
        for row in data.iter_mut() {
            row[j] = rng.next_f64();
            sum += row[j];
        }
        if sum > 0.0 {
            for row in data.iter_mut() {
                row[j] /= sum;
            }
        }
    }
    from_rows(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{determinant, transpose};
    use crate::arithmetic::multiply;

    fn rng() -> Lcg {
        Lcg::new(42)
    }

    #[test]
    fn test_lcg_deterministic() {
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
        let x = Lcg::new(7).next_f64();
        assert!((0.0..1.0).contains(&x));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(MatrixKind::parse("random"), Some(MatrixKind::Random));
        assert_eq!(MatrixKind::parse("dense"), Some(MatrixKind::Random));
        assert_eq!(
            MatrixKind::parse("skew-symmetric"),
            Some(MatrixKind::SkewSymmetric)
        );
        assert_eq!(
            MatrixKind::parse("LEFT-STOCHASTIC"),
            Some(MatrixKind::LeftStochastic)
        );
        assert_eq!(MatrixKind::parse("hessenberg"), None);
    }

    #[test]
    fn test_random_entries_in_range() {
        let m = build(MatrixKind::Random, 4, 5, &mut rng()).data;
        assert_eq!((m.rows(), m.cols()), (4, 5));
        for row in m.row_slices() {
            for &x in row {
                assert!((0.0..10.0).contains(&x) && x.fract() == 0.0);
            }
        }
    }

    #[test]
    fn test_identity_square_substitution() {
        let c = build(MatrixKind::Identity, 3, 5, &mut rng());
        assert_eq!(c.data, Matrix::identity(3));
        assert!(c.error_message.unwrap().contains("must be square"));
    }

    #[test]
    fn test_diagonal_and_scalar() {
        let d = build(MatrixKind::Diagonal, 2, 4, &mut rng()).data;
        assert_eq!(d.get(0, 0), Some(1.0));
        assert_eq!(d.get(1, 1), Some(1.0));
        assert_eq!(d.get(0, 1), Some(0.0));
        let s = build(MatrixKind::Scalar, 3, 3, &mut rng()).data;
        assert_eq!(s.get(2, 2), Some(5.0));
        assert_eq!(s.get(0, 1), Some(0.0));
    }

    #[test]
    fn test_triangular_shapes() {
        let u = build(MatrixKind::UpperTriangular, 4, 4, &mut rng()).data;
        for i in 0..4 {
            for j in 0..i {
                assert_eq!(u.get(i, j), Some(0.0));
            }
        }
        let l = build(MatrixKind::LowerTriangular, 4, 4, &mut rng()).data;
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_eq!(l.get(i, j), Some(0.0));
            }
        }
    }

    #[test]
    fn test_symmetry_properties() {
        let s = build(MatrixKind::Symmetric, 4, 4, &mut rng()).data;
        assert_eq!(s, transpose(&s));
        let k = build(MatrixKind::SkewSymmetric, 4, 4, &mut rng()).data;
        let neg = k.map(|x| -x);
        assert_eq!(transpose(&k), neg);
    }

    #[test]
    fn test_orthogonal_q_qt_is_identity() {
        let q = build(MatrixKind::Orthogonal, 3, 3, &mut rng()).data;
        let prod = multiply(&q, &transpose(&q)).unwrap();
        let diff = prod.max_abs_diff(&Matrix::identity(3)).unwrap();
        assert!(diff < 1e-9, "max diff {}", diff);
    }

    #[test]
    fn test_idempotent_squares_to_itself() {
        let a = build(MatrixKind::Idempotent, 3, 3, &mut rng()).data;
        let sq = multiply(&a, &a).unwrap();
        assert!(sq.max_abs_diff(&a).unwrap() < 1e-9);
    }

    #[test]
    fn test_involutory_squares_to_identity() {
        let a = build(MatrixKind::Involutory, 3, 3, &mut rng()).data;
        let sq = multiply(&a, &a).unwrap();
        assert!(sq.max_abs_diff(&Matrix::identity(3)).unwrap() < 1e-9);
    }

    #[test]
    fn test_nilpotent_power_vanishes() {
        let n = build(MatrixKind::Nilpotent, 3, 3, &mut rng()).data;
        let n2 = multiply(&n, &n).unwrap();
        let n3 = multiply(&n2, &n).unwrap();
        assert_eq!(n3, Matrix::zeros(3, 3));
    }

    #[test]
    fn test_singular_and_non_singular() {
        let s = build(MatrixKind::Singular, 3, 3, &mut rng()).data;
        assert!(determinant(&s).unwrap().abs() <= 1e-10);
        let n = build(MatrixKind::NonSingular, 3, 3, &mut rng()).data;
        assert!(determinant(&n).unwrap().abs() >= 1e-10);
    }

    #[test]
    fn test_stochastic_sums() {
        let r = build(MatrixKind::Stochastic, 3, 3, &mut rng()).data;
        for row in r.row_slices() {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        let l = build(MatrixKind::LeftStochastic, 3, 3, &mut rng()).data;
        for j in 0..3 {
            let col: f64 = (0..3).map(|i| l.get(i, j).unwrap()).sum();
            assert!((col - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hermitian_unsupported() {
        let c = build(MatrixKind::Hermitian, 3, 3, &mut rng());
        assert_eq!(c.data, Matrix::zeros(3, 3));
        assert!(c.error_message.unwrap().contains("complex numbers"));
    }

    #[test]
    fn test_sparse_density() {
        let m = build(MatrixKind::Sparse, 5, 5, &mut rng()).data;
        let nonzero = m
            .row_slices()
            .flat_map(|r| r.iter())
            .filter(|&&x| x != 0.0)
            .count();
        assert_eq!(nonzero, 5); // floor(25 * 0.2)
    }

    #[test]
    fn test_row_and_column_vectors() {
        let r = build(MatrixKind::Row, 3, 4, &mut rng()).data;
        assert_eq!((r.rows(), r.cols()), (1, 4));
        let c = build(MatrixKind::Column, 3, 4, &mut rng()).data;
        assert_eq!((c.rows(), c.cols()), (3, 1));
    }
}
