//! mxcalc - Matrix algebra with an infix expression evaluator
//!
//! The [`MatrixCalculator`] owns a table of named matrices and evaluates
//! expressions such as `det(A) * 2 + trace(B)` or `A * inv(B)` against it.
//! Matrix generation, the operation dispatcher, and the evaluator are also
//! available directly through the re-exported crates.
//!
//! ```
//! use mxcalc::{matrix, MatrixCalculator, Value};
//!
//! let mut calc = MatrixCalculator::new();
//! calc.insert("A", matrix![[1.0, 2.0], [3.0, 4.0]].unwrap());
//! assert_eq!(calc.evaluate("det(A)").unwrap(), Value::Scalar(-2.0));
//! ```

pub use mxcalc_core::{codes, CalcError, LuFactors, Matrix, Value, EPSILON};
pub use mxcalc_expr::{MatrixTable, Operation, Token, TokenKind};
pub use mxcalc_linalg::{Lcg, MatrixCreation, MatrixKind, ScalarFn};

pub use mxcalc_expr as expr;
pub use mxcalc_linalg as linalg;

/// Default generator seed when none is supplied.
const DEFAULT_SEED: u64 = 0x5eed;

/// The calculator engine: a matrix table plus a seeded generator.
pub struct MatrixCalculator {
    matrices: MatrixTable,
    rng: Lcg,
}

impl MatrixCalculator {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Calculator whose generated matrices are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            matrices: MatrixTable::new(),
            rng: Lcg::new(seed),
        }
    }

    pub fn insert(&mut self, label: impl Into<String>, matrix: Matrix) {
        self.matrices.insert(label.into(), matrix);
    }

    pub fn remove(&mut self, label: &str) -> Option<Matrix> {
        self.matrices.remove(label)
    }

    pub fn get(&self, label: &str) -> Option<&Matrix> {
        self.matrices.get(label)
    }

    pub fn matrices(&self) -> &MatrixTable {
        &self.matrices
    }

    /// Tokenize and evaluate an expression against the stored matrices.
    pub fn evaluate(&self, expression: &str) -> Result<Value, CalcError> {
        let tokens = mxcalc_expr::tokenize(expression)?;
        if !mxcalc_expr::balanced_parens(&tokens) {
            return Err(CalcError::MismatchedParentheses("unbalanced expression"));
        }
        mxcalc_expr::evaluate(&tokens, &self.matrices)
    }

    /// Generate a matrix of the named kind using the calculator's generator.
    pub fn create(
        &mut self,
        kind_tag: &str,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixCreation, CalcError> {
        let kind = MatrixKind::parse(kind_tag)
            .ok_or_else(|| CalcError::domain("create", format!("unknown matrix kind: {kind_tag}")))?;
        Ok(mxcalc_linalg::construct::build(kind, rows, cols, &mut self.rng))
    }

    /// Like [`create`](Self::create) but with a one-off seed, leaving the
    /// calculator's own generator untouched.
    pub fn create_seeded(
        &self,
        kind_tag: &str,
        rows: usize,
        cols: usize,
        seed: u64,
    ) -> Result<MatrixCreation, CalcError> {
        let kind = MatrixKind::parse(kind_tag)
            .ok_or_else(|| CalcError::domain("create", format!("unknown matrix kind: {kind_tag}")))?;
        let mut rng = Lcg::new(seed);
        Ok(mxcalc_linalg::construct::build(kind, rows, cols, &mut rng))
    }

    /// Apply a named operation (`det`, `inv`, `sin`, ...) to a stored matrix.
    pub fn perform(&self, op: &str, label: &str) -> Result<Value, CalcError> {
        let matrix = self
            .matrices
            .get(label)
            .ok_or_else(|| CalcError::UnknownMatrix(label.to_string()))?;
        mxcalc_expr::perform(op, &Value::Matrix(matrix.clone()))
    }
}

impl Default for MatrixCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a [`Matrix`] from row literals: `matrix![[1.0, 2.0], [3.0, 4.0]]`.
/// Yields a `Result` because ragged rows are rejected.
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)?]),* $(,)?) => {
        $crate::Matrix::from_rows(vec![$(vec![$($x as f64),*]),*])
    };
}

/// Build a [`MatrixTable`] from `label: matrix` pairs.
#[macro_export]
macro_rules! context {
    {} => { $crate::MatrixTable::new() };
    { $($key:ident : $value:expr),* $(,)? } => {{
        let mut map = $crate::MatrixTable::new();
        $(
            map.insert(stringify!($key).to_string(), $value);
        )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_calc() -> MatrixCalculator {
        let mut calc = MatrixCalculator::with_seed(42);
        calc.insert("A", matrix![[1.0, 2.0], [3.0, 4.0]].unwrap());
        calc.insert("B", matrix![[0.0, 1.0], [1.0, 0.0]].unwrap());
        calc.insert("S", matrix![[1.0, 2.0], [2.0, 4.0]].unwrap());
        calc
    }

    #[test]
    fn test_scalar_expression() {
        let calc = test_calc();
        assert_eq!(calc.evaluate("1+2*3").unwrap(), Value::Scalar(7.0));
        assert_eq!(calc.evaluate("2^3^2").unwrap(), Value::Scalar(64.0));
    }

    #[test]
    fn test_matrix_expression() {
        let calc = test_calc();
        let result = calc.evaluate("A*B+A").unwrap();
        assert_eq!(
            result,
            Value::Matrix(matrix![[3.0, 3.0], [7.0, 7.0]].unwrap())
        );
    }

    #[test]
    fn test_function_in_expression() {
        let calc = test_calc();
        assert_eq!(calc.evaluate("det(A)+1").unwrap(), Value::Scalar(-1.0));
        assert_eq!(calc.evaluate("rank(S)").unwrap(), Value::Scalar(1.0));
    }

    #[test]
    fn test_division_by_singular_matrix() {
        let calc = test_calc();
        assert!(matches!(
            calc.evaluate("A/S"),
            Err(CalcError::Singular { .. })
        ));
    }

    #[test]
    fn test_unbalanced_parens_rejected_up_front() {
        let calc = test_calc();
        assert!(matches!(
            calc.evaluate("(A+B))("),
            Err(CalcError::MismatchedParentheses(_))
        ));
    }

    #[test]
    fn test_insert_remove_get() {
        let mut calc = test_calc();
        assert!(calc.get("A").is_some());
        assert!(calc.remove("A").is_some());
        assert!(calc.get("A").is_none());
        assert!(matches!(
            calc.evaluate("A+B"),
            Err(CalcError::UnknownMatrix(_))
        ));
    }

    #[test]
    fn test_create_is_seed_reproducible() {
        let mut a = MatrixCalculator::with_seed(7);
        let mut b = MatrixCalculator::with_seed(7);
        assert_eq!(
            a.create("random", 3, 3).unwrap().data,
            b.create("random", 3, 3).unwrap().data
        );
        let calc = test_calc();
        assert_eq!(
            calc.create_seeded("random", 3, 3, 9).unwrap().data,
            calc.create_seeded("random", 3, 3, 9).unwrap().data
        );
    }

    #[test]
    fn test_create_unknown_kind() {
        let mut calc = test_calc();
        assert!(matches!(
            calc.create("toeplitz", 3, 3),
            Err(CalcError::Domain { .. })
        ));
    }

    #[test]
    fn test_create_square_substitution_message() {
        let mut calc = test_calc();
        let creation = calc.create("identity", 2, 5).unwrap();
        assert_eq!(creation.data, Matrix::identity(2));
        assert!(creation.error_message.unwrap().contains("must be square"));
    }

    #[test]
    fn test_perform_against_stored_matrix() {
        let calc = test_calc();
        assert_eq!(calc.perform("det", "A").unwrap(), Value::Scalar(-2.0));
        assert!(matches!(
            calc.perform("det", "Q"),
            Err(CalcError::UnknownMatrix(_))
        ));
        assert!(matches!(
            calc.perform("inv", "S"),
            Err(CalcError::Singular { .. })
        ));
    }

    #[test]
    fn test_context_macro() {
        let table = context! {
            A: matrix![[1.0]].unwrap(),
            B: matrix![[2.0]].unwrap(),
        };
        assert_eq!(table.len(), 2);
        let result = mxcalc_expr::evaluate(&mxcalc_expr::tokenize("A+B").unwrap(), &table).unwrap();
        assert_eq!(result, Value::Matrix(matrix![[3.0]].unwrap()));
    }

    #[test]
    fn test_elementwise_function_updates_nothing() {
        let calc = test_calc();
        let before = calc.get("A").cloned().unwrap();
        let _ = calc.evaluate("sin(A)").unwrap();
        assert_eq!(calc.get("A").cloned().unwrap(), before);
    }
}
