//! Expression tokenizer
//!
//! Whitespace is stripped wholesale before scanning, so `d e t (A)` and
//! `det(A)` tokenize identically. An identifier immediately followed by `(`
//! becomes a lower-cased function token; matrix labels keep their case.

use mxcalc_core::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
    Function,
    Paren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_operator(&self, op: char) -> bool {
        self.kind == TokenKind::Operator && self.text.chars().next() == Some(op)
    }

    pub fn is_paren(&self, paren: char) -> bool {
        self.kind == TokenKind::Paren && self.text.chars().next() == Some(paren)
    }
}

/// Split an expression into tokens.
///
/// Numbers absorb digits and dots without validating dot count; the numeric
/// parse happens later and takes the longest valid prefix. There is no unary
/// minus: `-` is always a binary operator.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_alphabetic() {
            let start = i;
            while i + 1 < chars.len() && chars[i + 1].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..=i].iter().collect();

            if chars.get(i + 1) == Some(&'(') {
                tokens.push(Token::new(TokenKind::Function, word.to_lowercase()));
            } else {
                tokens.push(Token::new(TokenKind::Identifier, word));
            }
        } else if c.is_ascii_digit() {
            let start = i;
            while i + 1 < chars.len() && (chars[i + 1].is_ascii_digit() || chars[i + 1] == '.') {
                i += 1;
            }
            let number: String = chars[start..=i].iter().collect();
            tokens.push(Token::new(TokenKind::Number, number));
        } else if "+-*/^".contains(c) {
            tokens.push(Token::new(TokenKind::Operator, c));
        } else if c == '(' || c == ')' {
            tokens.push(Token::new(TokenKind::Paren, c));
        } else {
            return Err(CalcError::InvalidCharacter(c));
        }
        i += 1;
    }

    Ok(tokens)
}

/// True when every `(` has a matching `)` and no `)` arrives early.
pub fn balanced_parens(tokens: &[Token]) -> bool {
    let mut depth = 0i32;
    for token in tokens {
        if token.is_paren('(') {
            depth += 1;
        } else if token.is_paren(')') {
            depth -= 1;
            if depth < 0 {
                return false;
            }
        }
    }
    depth == 0
}
