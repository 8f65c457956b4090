//! mxcalc-expr - Infix expression evaluation over matrices and scalars
//!
//! Three stages, each usable on its own:
//! - [`token`]: split an expression string into tokens
//! - [`dispatch`]: resolve and apply named operations (`det`, `inv`, `sin`...)
//! - [`eval`]: recursive descent evaluation against a matrix table

pub mod dispatch;
pub mod eval;
pub mod token;

pub use dispatch::{matrix_power, perform, Operation};
pub use eval::{evaluate, MatrixTable};
pub use token::{balanced_parens, tokenize, Token, TokenKind};
