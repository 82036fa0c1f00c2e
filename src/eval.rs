//! Arithmetic expression evaluation.
//!
//! A small precedence-climbing parser over `+ - * /` and decimal
//! literals. Deliberately tiny: the keypad cannot produce anything else,
//! and an evaluate-anything primitive is exactly what this crate avoids.

use thiserror::Error;

// ── Errors ─────────────────────────────────────────────────

/// Why an expression failed to evaluate.
///
/// The state machine folds all of these into a single user-visible
/// failure; the distinctions exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char),
    #[error("expected a number")]
    ExpectedNumber,
    #[error("trailing input after expression")]
    Trailing,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result out of range")]
    NonFinite,
}

// ── Tokens ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' | '.' => {
                let mut lexeme = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        lexeme.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = lexeme
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(lexeme))?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

// ── Parser ─────────────────────────────────────────────────

/// Binding strength of a binary operator.
fn precedence(token: Token) -> Option<u8> {
    match token {
        Token::Plus | Token::Minus => Some(1),
        Token::Star | Token::Slash => Some(2),
        Token::Number(_) => None,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_expr(&mut self, min_prec: u8) -> Result<f64, EvalError> {
        let mut lhs = self.parse_unary()?;

        while let Some(op) = self.peek() {
            let prec = match precedence(op) {
                Some(p) if p >= min_prec => p,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_expr(prec + 1)?;
            lhs = apply(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    /// A literal, optionally prefixed by unary `+`/`-` chains.
    ///
    /// Prefix chains make operator runs typed on the keypad (`5*-3`,
    /// `5++3`) evaluate instead of erroring.
    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Minus) => Ok(-self.parse_unary()?),
            Some(Token::Plus) => self.parse_unary(),
            Some(Token::Star) | Some(Token::Slash) | None => Err(EvalError::ExpectedNumber),
        }
    }
}

fn apply(op: Token, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    match op {
        Token::Plus => Ok(lhs + rhs),
        Token::Minus => Ok(lhs - rhs),
        Token::Star => Ok(lhs * rhs),
        Token::Slash => {
            if rhs == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(lhs / rhs)
            }
        }
        Token::Number(_) => Err(EvalError::Trailing),
    }
}

// ── Entry points ───────────────────────────────────────────

/// Evaluate an expression string with standard operator precedence and
/// real-number semantics.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.parse_expr(0)?;
    if parser.pos != parser.tokens.len() {
        return Err(EvalError::Trailing);
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Format an evaluation result for the display buffer.
///
/// Integral values drop the fractional part, so `12+3` shows `15`
/// rather than `15.0`.
pub fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ── Tests ──────────────────────────────────────────────────
