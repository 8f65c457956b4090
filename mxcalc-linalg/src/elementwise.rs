//! Element-wise scalar functions
//!
//! The same functions serve scalars directly and matrices entry-by-entry.
//! Domain failures surface as errors rather than NaN so a pole inside a
//! matrix aborts the whole map.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use mxcalc_core::{CalcError, Matrix, EPSILON};

/// A named scalar function applicable to a scalar or, entry-wise, a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sec,
    Csc,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Log,
}

impl ScalarFn {
    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "asin" => Some(Self::Asin),
            "acos" => Some(Self::Acos),
            "atan" => Some(Self::Atan),
            "sec" => Some(Self::Sec),
            "csc" => Some(Self::Csc),
            "cot" => Some(Self::Cot),
            "sinh" => Some(Self::Sinh),
            "cosh" => Some(Self::Cosh),
            "tanh" => Some(Self::Tanh),
            "log" => Some(Self::Log),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Cot => "cot",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Log => "log",
        }
    }

    /// Apply to a single scalar.
    ///
    /// Pole detection for tan/cot uses the remainder against pi, for sec/csc
    /// the magnitude of the underlying cos/sin. `log` is the natural log and
    /// rejects non-positive input.
    pub fn apply(&self, x: f64) -> Result<f64, CalcError> {
        match self {
            Self::Sin => Ok(x.sin()),
            Self::Cos => Ok(x.cos()),
            Self::Tan => {
                if (x % PI - FRAC_PI_2).abs() < EPSILON {
                    Err(self.undefined_at())
                } else {
                    Ok(x.tan())
                }
            }
            Self::Asin => {
                if x.abs() <= 1.0 {
                    Ok(x.asin())
                } else {
                    Err(self.out_of_domain())
                }
            }
            Self::Acos => {
                if x.abs() <= 1.0 {
                    Ok(x.acos())
                } else {
                    Err(self.out_of_domain())
                }
            }
            Self::Atan => Ok(x.atan()),
            Self::Sec => {
                if x.cos().abs() < EPSILON {
                    Err(self.undefined_at())
                } else {
                    Ok(1.0 / x.cos())
                }
            }
            Self::Csc => {
                if x.sin().abs() < EPSILON {
                    Err(self.undefined_at())
                } else {
                    Ok(1.0 / x.sin())
                }
            }
            Self::Cot => {
                if (x % PI).abs() < EPSILON {
                    Err(self.undefined_at())
                } else {
                    Ok(1.0 / x.tan())
                }
            }
            Self::Sinh => Ok(x.sinh()),
            Self::Cosh => Ok(x.cosh()),
            Self::Tanh => Ok(x.tanh()),
            Self::Log => {
                if x > 0.0 {
                    Ok(x.ln())
                } else {
                    Err(CalcError::domain("log", "input must be positive"))
                }
            }
        }
    }

    fn undefined_at(&self) -> CalcError {
        CalcError::domain(self.name(), "undefined value")
    }

    fn out_of_domain(&self) -> CalcError {
        CalcError::domain(self.name(), "input out of domain [-1, 1]")
    }
}

impl fmt::Display for ScalarFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply a scalar function to every entry. The first failing entry aborts
/// the whole operation.
pub fn map(f: ScalarFn, m: &Matrix) -> Result<Matrix, CalcError> {
    let data = m
        .row_slices()
        .map(|row| row.iter().map(|&x| f.apply(x)).collect())
        .collect::<Result<Vec<Vec<f64>>, CalcError>>()?;
    Matrix::from_rows(data)
}
