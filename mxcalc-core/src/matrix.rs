//! The matrix value type

use crate::CalcError;
use serde::Serialize;
use std::fmt;

/// A rectangular matrix of f64 entries.
///
/// Invariant: `data.len() == rows` and every row has exactly `cols` entries.
/// A 0x0 matrix is a legal degenerate value representing "empty". Matrices
/// are value types: operations allocate fresh results and never mutate
/// their arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    data: Vec<Vec<f64>>,
    rows: usize,
    cols: usize,
}

/// Result of an LU decomposition: `L` and `U` with the input's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuFactors {
    pub l: Matrix,
    pub u: Matrix,
}

impl Matrix {
    /// Create a matrix from nested rows, validating rectangularity.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self, CalcError> {
        let rows = data.len();
        let cols = data.first().map_or(0, |r| r.len());

        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                return Err(CalcError::domain(
                    "matrix",
                    format!("row {} has {} columns, expected {}", i, row.len(), cols),
                ));
            }
        }

        Ok(Self { data, rows, cols })
    }

    /// The 0x0 empty matrix.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }

    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![vec![0.0; cols]; rows],
            rows,
            cols,
        }
    }

    /// Identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.data[i][i] = 1.0;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Entry at (row, col), if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Borrow the rows as slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(|r| r.as_slice())
    }

    /// Clone out the raw nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    /// Consume into the raw nested rows.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.data
    }

    /// Build the result of an entry-wise map over this matrix's shape.
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Matrix {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&x| f(x)).collect())
            .collect();
        Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Maximum absolute entry-wise difference to another matrix of the same
    /// shape. `None` when shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f64> {
        if self.rows != other.rows || self.cols != other.cols {
            return None;
        }
        let mut max = 0.0f64;
        for (a, b) in self.data.iter().zip(&other.data) {
            for (&x, &y) in a.iter().zip(b) {
                max = max.max((x - y).abs());
            }
        }
        Some(max)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", val)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for LuFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L: {}, U: {}", self.l, self.u)
    }
}
