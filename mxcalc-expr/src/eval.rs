//! Recursive descent evaluator
//!
//! Parses and evaluates in one pass over the token stream, producing a single
//! `Value` or the first error. Matrix identifiers resolve against a read-only
//! table, so evaluation never mutates caller state.
//!
//! Grammar:
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := power (('*' | '/') power)*
//! power      := factor ('^' factor)*
//! factor     := number | identifier | function '(' expression ')'
//!             | '(' expression ')'
//! ```
//! `^` binds tighter than `*` and `/` but is LEFT-associative, so
//! `2^3^2 == (2^3)^2 == 64`. There is no unary minus.

use std::collections::HashMap;

use mxcalc_core::{CalcError, Matrix, Value};
use mxcalc_linalg::{analysis, arithmetic};
use tracing::debug;

use crate::dispatch;
use crate::token::{Token, TokenKind};

/// Named matrices visible to an expression.
pub type MatrixTable = HashMap<String, Matrix>;

/// Evaluate a token stream against a matrix table.
pub fn evaluate(tokens: &[Token], table: &MatrixTable) -> Result<Value, CalcError> {
    debug!(token_count = tokens.len(), "evaluating expression");

    let mut ev = Evaluator {
        tokens,
        table,
        position: 0,
    };
    let result = ev.expression()?;

    if let Some(extra) = ev.peek() {
        return Err(CalcError::UnexpectedToken(extra.text.clone()));
    }

    debug!(result = %result, "expression evaluated");
    Ok(result)
}

struct Evaluator<'a> {
    tokens: &'a [Token],
    table: &'a MatrixTable,
    position: usize,
}

impl<'a> Evaluator<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Value, CalcError> {
        let mut left = self.term()?;

        while let Some(token) = self.peek() {
            let op = if token.is_operator('+') {
                '+'
            } else if token.is_operator('-') {
                '-'
            } else {
                break;
            };
            self.position += 1;
            let right = self.term()?;
            left = add_sub(op, left, right)?;
        }

        Ok(left)
    }

    fn term(&mut self) -> Result<Value, CalcError> {
        let mut left = self.power()?;

        while let Some(token) = self.peek() {
            if token.is_operator('*') {
                self.position += 1;
                let right = self.power()?;
                left = mul(left, right)?;
            } else if token.is_operator('/') {
                self.position += 1;
                let right = self.power()?;
                left = div(left, right)?;
            } else {
                break;
            }
        }

        Ok(left)
    }

    fn power(&mut self) -> Result<Value, CalcError> {
        let mut left = self.factor()?;

        while let Some(token) = self.peek() {
            if !token.is_operator('^') {
                break;
            }
            self.position += 1;
            let right = self.factor()?;
            left = pow(left, right)?;
        }

        Ok(left)
    }

    fn factor(&mut self) -> Result<Value, CalcError> {
        let token = self.advance().ok_or(CalcError::UnexpectedEnd)?;

        match token.kind {
            TokenKind::Number => Ok(Value::Scalar(parse_number(&token.text)?)),
            TokenKind::Identifier => self
                .table
                .get(&token.text)
                .cloned()
                .map(Value::Matrix)
                .ok_or_else(|| CalcError::UnknownMatrix(token.text.clone())),
            TokenKind::Function => self.function_call(&token.text),
            TokenKind::Paren if token.text == "(" => {
                let inner = self.expression()?;
                self.expect_close_paren("expected closing parenthesis")?;
                Ok(inner)
            }
            _ => Err(CalcError::UnexpectedToken(token.text.clone())),
        }
    }

    fn function_call(&mut self, name: &str) -> Result<Value, CalcError> {
        match self.advance() {
            Some(token) if token.is_paren('(') => {}
            _ => {
                return Err(CalcError::MismatchedParentheses(
                    "expected '(' after function name",
                ))
            }
        }

        let arg = self.expression()?;
        self.expect_close_paren("expected ')' after function argument")?;

        debug!(function = name, arg = %arg, "applying function");
        dispatch::perform(name, &arg)
    }

    fn expect_close_paren(&mut self, message: &'static str) -> Result<(), CalcError> {
        match self.advance() {
            Some(token) if token.is_paren(')') => Ok(()),
            _ => Err(CalcError::MismatchedParentheses(message)),
        }
    }
}

/// Parse the longest numeric prefix of a number token.
///
/// The tokenizer accepts strings like `1.2.3`; this resolves them the way a
/// longest-prefix parse would, to `1.2`.
fn parse_number(text: &str) -> Result<f64, CalcError> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    text[..end]
        .parse()
        .map_err(|_| CalcError::UnexpectedToken(text.to_string()))
}

fn add_sub(op: char, left: Value, right: Value) -> Result<Value, CalcError> {
    match (&left, &right) {
        (Value::Matrix(a), Value::Matrix(b)) => {
            let result = if op == '+' {
                arithmetic::add(a, b)?
            } else {
                arithmetic::subtract(a, b)?
            };
            Ok(result.into())
        }
        (Value::Scalar(a), Value::Scalar(b)) => {
            Ok(if op == '+' { a + b } else { a - b }.into())
        }
        _ => Err(invalid(op, &left, &right)),
    }
}

fn mul(left: Value, right: Value) -> Result<Value, CalcError> {
    match (&left, &right) {
        (Value::Scalar(k), Value::Matrix(m)) | (Value::Matrix(m), Value::Scalar(k)) => {
            Ok(arithmetic::scalar_multiply(*k, m).into())
        }
        (Value::Matrix(a), Value::Matrix(b)) => Ok(arithmetic::multiply(a, b)?.into()),
        (Value::Scalar(a), Value::Scalar(b)) => Ok((a * b).into()),
        _ => Err(invalid('*', &left, &right)),
    }
}

/// Division: scalar/scalar, or matrix "division" as `A * inv(B)`.
fn div(left: Value, right: Value) -> Result<Value, CalcError> {
    match (&left, &right) {
        (Value::Matrix(a), Value::Matrix(b)) => {
            let inv = analysis::inverse(b)?;
            Ok(arithmetic::multiply(a, &inv)?.into())
        }
        (Value::Scalar(a), Value::Scalar(b)) => {
            if *b == 0.0 {
                Err(CalcError::DivisionByZero)
            } else {
                Ok((a / b).into())
            }
        }
        _ => Err(invalid('/', &left, &right)),
    }
}

fn pow(left: Value, right: Value) -> Result<Value, CalcError> {
    match (&left, &right) {
        (Value::Matrix(a), Value::Scalar(n)) => Ok(dispatch::matrix_power(a, *n)?.into()),
        (Value::Scalar(a), Value::Scalar(b)) => Ok(a.powf(*b).into()),
        _ => Err(invalid('^', &left, &right)),
    }
}

fn invalid(op: char, left: &Value, right: &Value) -> CalcError {
    CalcError::InvalidOperands {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
}
