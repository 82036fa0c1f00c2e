//! Per-frame session state: the context object owning the keypad,
//! classifier, debouncer, and expression buffer.
//!
//! One `process_frame` call per captured frame, components invoked in a
//! fixed order: classifier, then debouncer on confirmed frames, then the
//! expression machine on a hit. The surrounding loop owns timing,
//! capture, and drawing; the core performs no I/O and needs no locking.

use tracing::debug;

use crate::expr::{ExprState, Expression};
use crate::keypad::{Button, Key, Keypad, KeypadConfig};
use crate::landmarks::HandFrame;
use crate::pinch::{PinchClassifier, PinchConfig, PinchPhase};
use crate::press::{PressConfig, PressDebouncer};

// ── Config ─────────────────────────────────────────────────

/// Aggregate configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub pinch: PinchConfig,
    pub press: PressConfig,
    pub keypad: KeypadConfig,
    /// Minimum detector confidence to treat a frame as a tracked hand.
    pub min_confidence: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pinch: PinchConfig::default(),
            press: PressConfig::default(),
            keypad: KeypadConfig::default(),
            min_confidence: 0.5,
        }
    }
}

// ── Events ─────────────────────────────────────────────────

/// Events emitted by one frame step.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Fingertips moved within pinch range; confirmation pending.
    PinchStarted,
    /// The pinch survived the confirmation delay.
    PinchConfirmed,
    /// The pinch broke, or the hand was lost.
    PinchReleased,
    /// A button press was dispatched.
    KeyPressed { key: Key },
    /// The expression display text changed.
    DisplayChanged { text: String },
}

// ── Session ────────────────────────────────────────────────

/// All mutable state of the gesture-to-interaction core.
pub struct CalcSession {
    keypad: Keypad,
    pinch: PinchClassifier,
    press: PressDebouncer,
    expr: Expression,
    min_confidence: f32,
    last_phase: PinchPhase,
}

impl CalcSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            keypad: Keypad::new(config.keypad),
            pinch: PinchClassifier::new(config.pinch),
            press: PressDebouncer::new(config.press),
            expr: Expression::new(),
            min_confidence: config.min_confidence,
            last_phase: PinchPhase::Idle,
        }
    }

    /// Step the core by one frame.
    ///
    /// `frame` is the detector's snapshot for this iteration (`None`
    /// when no hand was detected) and `now_s` a monotonic timestamp in
    /// seconds; the core never reads a clock itself.
    pub fn process_frame(
        &mut self,
        frame: Option<&HandFrame>,
        now_s: f64,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        // Low-confidence and malformed frames classify as "no hand".
        let tips = frame
            .filter(|f| f.confidence >= self.min_confidence)
            .and_then(|f| f.fingertips());

        let phase = self.pinch.update(tips, now_s);
        if phase != self.last_phase {
            match phase {
                PinchPhase::Tentative => events.push(SessionEvent::PinchStarted),
                PinchPhase::Confirmed => events.push(SessionEvent::PinchConfirmed),
                PinchPhase::Idle => {
                    if self.last_phase.is_pinching() {
                        events.push(SessionEvent::PinchReleased);
                    }
                }
            }
            debug!("pinch phase: {}", phase.as_str());
        }
        self.last_phase = phase;

        if phase == PinchPhase::Confirmed {
            if let Some((index_tip, _)) = tips {
                let pressed = self
                    .press
                    .try_press(index_tip, now_s, &self.keypad)
                    .map(|b| b.key);
                if let Some(key) = pressed {
                    events.push(SessionEvent::KeyPressed { key });

                    let before = self.expr.display().to_string();
                    self.expr.apply(key);
                    if self.expr.display() != before {
                        events.push(SessionEvent::DisplayChanged {
                            text: self.expr.display().to_string(),
                        });
                    }
                }
            }
        }

        events
    }

    // ── Renderer-facing accessors ─────────────────────────

    /// Ordered button sequence for drawing.
    pub fn buttons(&self) -> &[Button] {
        self.keypad.buttons()
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Current expression display text.
    pub fn display(&self) -> &str {
        self.expr.display()
    }

    /// Last `n` characters of the display text.
    pub fn display_tail(&self, n: usize) -> &str {
        self.expr.display_tail(n)
    }

    pub fn expr_state(&self) -> ExprState {
        self.expr.state()
    }

    /// Reset all gesture, press, and expression state. The keypad is
    /// untouched.
    pub fn reset(&mut self) {
        self.pinch.reset();
        self.press.reset();
        self.expr = Expression::new();
        self.last_phase = PinchPhase::Idle;
    }
}

impl Default for CalcSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
use crate::geometry::Point;
#[cfg(test)]
use crate::landmarks::{HandLandmark, LANDMARK_COUNT};

/// A complete landmark frame with the index tip at `tip` and the thumb
/// tip `spread` pixels to its right.
#[cfg(test)]
fn frame_at(tip: Point, spread: f32, confidence: f32) -> HandFrame {
    let mut points = vec![Point::default(); LANDMARK_COUNT];
    points[HandLandmark::IndexTip.index()] = tip;
    points[HandLandmark::ThumbTip.index()] = Point::new(tip.x + spread, tip.y);
    HandFrame::new(points, confidence)
}

#[cfg(test)]
fn pinched_frame(tip: Point) -> HandFrame {
    frame_at(tip, 10.0, 0.9)
}

#[cfg(test)]
fn open_frame(tip: Point) -> HandFrame {
    frame_at(tip, 120.0, 0.9)
}

// ── Tests ──────────────────────────────────────────────────
