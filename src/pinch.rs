//! Pinch classification with temporal confirmation.
//!
//! Decides, per frame, whether the hand is performing a sustained pinch.
//! The confirmation delay filters transient finger crossings (landmark
//! detection noise) from intentional pinches.

use tracing::debug;

use crate::geometry::{distance, Point};

// ── Phase ──────────────────────────────────────────────────

/// Per-frame pinch classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchPhase {
    /// Fingertips apart, or no hand this frame.
    Idle,
    /// Fingertips within pinch range; confirmation delay still running.
    Tentative,
    /// The pinch has been held past the confirmation delay.
    Confirmed,
}

impl PinchPhase {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Tentative => "tentative",
            Self::Confirmed => "confirmed",
        }
    }

    /// Whether the fingertips are currently within pinch range.
    pub fn is_pinching(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

// ── Config ─────────────────────────────────────────────────

/// Pinch detection thresholds.
///
/// `threshold_px` lives in the same coordinate space as the landmark
/// positions and must be recalibrated if that space changes (normalized
/// coordinates instead of pixels, a different capture resolution).
#[derive(Debug, Clone)]
pub struct PinchConfig {
    /// Maximum fingertip separation (pixels) to count as pinching.
    pub threshold_px: f32,
    /// Minimum continuous pinch duration (seconds) before confirmation.
    pub confirm_delay_s: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            threshold_px: 40.0,
            confirm_delay_s: 0.2,
        }
    }
}

// ── Classifier ─────────────────────────────────────────────

/// Stateful pinch classifier. One instance per tracked hand.
#[derive(Debug)]
pub struct PinchClassifier {
    /// Configuration.
    pub config: PinchConfig,
    /// Whether the fingertips were within range on the previous frame.
    active: bool,
    /// When the current pinch began (seconds).
    start_time_s: f64,
}

impl PinchClassifier {
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            active: false,
            start_time_s: 0.0,
        }
    }

    /// Classify one frame.
    ///
    /// `fingertips` is the (index tip, thumb tip) pair, or `None` when no
    /// hand was detected; a no-hand frame cancels any in-progress
    /// confirmation. Pinching uses strict inequality against the
    /// threshold, confirmation strict inequality against the delay.
    pub fn update(&mut self, fingertips: Option<(Point, Point)>, now_s: f64) -> PinchPhase {
        let (index_tip, thumb_tip) = match fingertips {
            Some(tips) => tips,
            None => {
                if self.active {
                    debug!("pinch cancelled: hand lost");
                }
                self.active = false;
                return PinchPhase::Idle;
            }
        };

        let d = distance(index_tip, thumb_tip);
        if d < self.config.threshold_px {
            if !self.active {
                self.active = true;
                self.start_time_s = now_s;
                debug!("pinch started at {:.1}px", d);
                PinchPhase::Tentative
            } else if now_s - self.start_time_s > self.config.confirm_delay_s {
                PinchPhase::Confirmed
            } else {
                PinchPhase::Tentative
            }
        } else {
            if self.active {
                debug!("pinch released at {:.1}px", d);
            }
            self.active = false;
            PinchPhase::Idle
        }
    }

    /// Whether a pinch (confirmed or not) is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Forget any in-progress pinch.
    pub fn reset(&mut self) {
        self.active = false;
        self.start_time_s = 0.0;
    }
}

impl Default for PinchClassifier {
    fn default() -> Self {
        Self::new(PinchConfig::default())
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Fingertip pair separated by `d` pixels.
#[cfg(test)]
fn tips_apart(d: f32) -> Option<(Point, Point)> {
    Some((Point::new(0.0, 0.0), Point::new(d, 0.0)))
}

// ── Tests ──────────────────────────────────────────────────
