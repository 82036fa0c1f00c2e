//! Expression accumulation state machine.
//!
//! Consumes dispatched key presses, mutates the expression buffer, and
//! evaluates on equals with local error recovery. Evaluation failures
//! surface only as the error sentinel; the machine never stops accepting
//! input.

use tracing::debug;

use crate::eval::{self, format_number};
use crate::keypad::Key;

/// Display text shown after a failed evaluation.
pub const ERROR_SENTINEL: &str = "Err";

// ── State ──────────────────────────────────────────────────

/// Whether the buffer holds tokens or the error sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprState {
    Accumulating,
    Error,
}

impl ExprState {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accumulating => "accumulating",
            Self::Error => "error",
        }
    }
}

// ── Expression ─────────────────────────────────────────────

/// The mutable expression buffer and its state.
#[derive(Debug)]
pub struct Expression {
    buffer: String,
    state: ExprState,
}

impl Expression {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            state: ExprState::Accumulating,
        }
    }

    pub fn state(&self) -> ExprState {
        self.state
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.buffer
    }

    /// Last `n` characters of the display text, for width-limited
    /// renderers.
    pub fn display_tail(&self, n: usize) -> &str {
        let count = self.buffer.chars().count();
        let skip = count.saturating_sub(n);
        match self.buffer.char_indices().nth(skip) {
            Some((idx, _)) => &self.buffer[idx..],
            None => "",
        }
    }

    /// Apply one dispatched key press.
    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Clear => {
                self.buffer.clear();
                self.state = ExprState::Accumulating;
            }
            Key::Equals => self.evaluate(),
            other => {
                if self.state == ExprState::Error {
                    // New input resumes accumulation; the sentinel is
                    // never appended to.
                    self.buffer.clear();
                    self.state = ExprState::Accumulating;
                }
                self.buffer.push(other.as_char());
            }
        }
    }

    fn evaluate(&mut self) {
        match eval::evaluate(&self.buffer) {
            Ok(value) => {
                self.buffer = format_number(value);
                self.state = ExprState::Accumulating;
                debug!("evaluated to {}", self.buffer);
            }
            Err(err) => {
                debug!("evaluation of {:?} failed: {}", self.buffer, err);
                self.buffer = ERROR_SENTINEL.to_string();
                self.state = ExprState::Error;
            }
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(expr: &mut Expression, chars: &str) {
        for c in chars.chars() {
            expr.apply(Key::from_char(c).expect("valid key"));
        }
    }

    #[test]
    fn test_digit_and_operator_entry() {
        let mut expr = Expression::new();
        press_all(&mut expr, "12+3");
        assert_eq!(expr.display(), "12+3");
        assert_eq!(expr.state(), ExprState::Accumulating);
    }

    #[test]
    fn test_evaluate_on_equals() {
        let mut expr = Expression::new();
        press_all(&mut expr, "12+3=");
        assert_eq!(expr.display(), "15");
        assert_eq!(expr.state(), ExprState::Accumulating);
    }

    #[test]
    fn test_result_feeds_next_entry() {
        let mut expr = Expression::new();
        press_all(&mut expr, "1+1=");
        assert_eq!(expr.display(), "2");
        // Entry continues after a result, as with any buffer content.
        press_all(&mut expr, "3");
        assert_eq!(expr.display(), "23");
    }

    #[test]
    fn test_division_by_zero_sets_sentinel() {
        let mut expr = Expression::new();
        press_all(&mut expr, "5/0=");
        assert_eq!(expr.display(), ERROR_SENTINEL);
        assert_eq!(expr.state(), ExprState::Error);
    }

    #[test]
    fn test_error_cleared_by_next_input() {
        let mut expr = Expression::new();
        press_all(&mut expr, "5/0=");
        assert_eq!(expr.state(), ExprState::Error);

        press_all(&mut expr, "7");
        assert_eq!(expr.display(), "7");
        assert_eq!(expr.state(), ExprState::Accumulating);
    }

    #[test]
    fn test_equals_on_empty_is_error() {
        let mut expr = Expression::new();
        expr.apply(Key::Equals);
        assert_eq!(expr.display(), ERROR_SENTINEL);
        assert_eq!(expr.state(), ExprState::Error);
    }

    #[test]
    fn test_equals_in_error_state_stays_error() {
        let mut expr = Expression::new();
        press_all(&mut expr, "5/0=");
        expr.apply(Key::Equals);
        assert_eq!(expr.display(), ERROR_SENTINEL);
        assert_eq!(expr.state(), ExprState::Error);
    }

    #[test]
    fn test_malformed_expression_is_error() {
        let mut expr = Expression::new();
        // Consecutive operators are accepted at entry and only caught
        // at evaluation.
        press_all(&mut expr, "5*/3");
        assert_eq!(expr.display(), "5*/3");
        expr.apply(Key::Equals);
        assert_eq!(expr.state(), ExprState::Error);
    }

    #[test]
    fn test_clear_from_any_state() {
        let mut expr = Expression::new();
        press_all(&mut expr, "12+3");
        expr.apply(Key::Clear);
        assert_eq!(expr.display(), "");
        assert_eq!(expr.state(), ExprState::Accumulating);

        press_all(&mut expr, "5/0=");
        expr.apply(Key::Clear);
        assert_eq!(expr.display(), "");
        assert_eq!(expr.state(), ExprState::Accumulating);
    }

    #[test]
    fn test_display_tail() {
        let mut expr = Expression::new();
        press_all(&mut expr, "12+3");
        assert_eq!(expr.display_tail(15), "12+3");

        press_all(&mut expr, "C");
        press_all(&mut expr, "11111111112222222222");
        assert_eq!(expr.display_tail(15), "111112222222222");
        assert_eq!(expr.display_tail(0), "");
    }

    #[test]
    fn test_state_as_str() {
        assert_eq!(ExprState::Accumulating.as_str(), "accumulating");
        assert_eq!(ExprState::Error.as_str(), "error");
    }
}
