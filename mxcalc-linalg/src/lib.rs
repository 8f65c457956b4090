//! mxcalc-linalg - Matrix kernels for the calculator
//!
//! Provides the numeric heart of the engine:
//! - Arithmetic (add, subtract, multiply, scalar multiply)
//! - Analysis and transformation (transpose, trace, determinant, cofactor,
//!   adjoint, inverse, row echelon form, rank, LU decomposition)
//! - Element-wise scalar function maps (trig, hyperbolic, log) with domain
//!   checking
//! - Matrix construction by named kind (identity, symmetric, stochastic, ...)
//!
//! All functions are pure: they allocate fresh result matrices and never
//! mutate their arguments. The determinant uses recursive cofactor expansion,
//! which is O(n!) and a documented performance cliff on large inputs, not a
//! correctness bug.

pub mod analysis;
pub mod arithmetic;
pub mod construct;
pub mod elementwise;

mod checks;

pub use checks::{check_mul_dims, check_same_dims, check_square};
pub use construct::{Lcg, MatrixCreation, MatrixKind};
pub use elementwise::ScalarFn;
