//! Press debouncing: collapse sustained confirmed pinches into single
//! button presses, subject to a global cooldown.
//!
//! A confirmed pinch persists across many frames; the cooldown window
//! opened by the first dispatched press swallows the rest.

use tracing::debug;

use crate::geometry::Point;
use crate::keypad::{Button, Keypad};

// ── Config ─────────────────────────────────────────────────

/// Press debounce timing.
#[derive(Debug, Clone)]
pub struct PressConfig {
    /// Minimum elapsed time (seconds) between two accepted presses.
    pub cooldown_s: f64,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self { cooldown_s: 0.5 }
    }
}

// ── Debouncer ──────────────────────────────────────────────

/// Converts confirmed-pinch frames into at most one press per cooldown
/// window, resolving which button (if any) is under the pinch point.
#[derive(Debug)]
pub struct PressDebouncer {
    /// Configuration.
    pub config: PressConfig,
    /// When the last press was accepted, or `None` before the first.
    last_press_s: Option<f64>,
}

impl PressDebouncer {
    pub fn new(config: PressConfig) -> Self {
        Self {
            config,
            last_press_s: None,
        }
    }

    /// Attempt to dispatch a press at `tip`. Call only on confirmed-pinch
    /// frames.
    ///
    /// Only a successful hit refreshes the cooldown timer; a near-miss
    /// pinch must not block a corrected attempt shortly after.
    pub fn try_press<'a>(
        &mut self,
        tip: Point,
        now_s: f64,
        keypad: &'a Keypad,
    ) -> Option<&'a Button> {
        if let Some(last) = self.last_press_s {
            if now_s - last <= self.config.cooldown_s {
                return None;
            }
        }
        let button = keypad.hit_test(tip)?;
        self.last_press_s = Some(now_s);
        debug!("press dispatched: '{}'", button.label());
        Some(button)
    }

    /// When the last press was accepted, if any.
    pub fn last_press_s(&self) -> Option<f64> {
        self.last_press_s
    }

    /// Forget the cooldown window.
    pub fn reset(&mut self) {
        self.last_press_s = None;
    }
}

impl Default for PressDebouncer {
    fn default() -> Self {
        Self::new(PressConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::Key;

    fn center_of(keypad: &Keypad, key: Key) -> Point {
        keypad.button(key).expect("key on keypad").center()
    }

    #[test]
    fn test_first_press_not_gated() {
        let keypad = Keypad::default();
        let mut debouncer = PressDebouncer::default();
        let tip = center_of(&keypad, Key::Digit(7));

        // No prior press: accepted even at time zero.
        let hit = debouncer.try_press(tip, 0.0, &keypad).expect("press");
        assert_eq!(hit.key, Key::Digit(7));
        assert_eq!(debouncer.last_press_s(), Some(0.0));
    }

    #[test]
    fn test_sustained_frames_dispatch_once() {
        let keypad = Keypad::default();
        let mut debouncer = PressDebouncer::default();
        let tip = center_of(&keypad, Key::Digit(5));

        let mut dispatched = 0;
        for i in 0..10 {
            let now = 1.0 + i as f64 / 30.0;
            if debouncer.try_press(tip, now, &keypad).is_some() {
                dispatched += 1;
            }
        }
        assert_eq!(dispatched, 1, "Expected one press per cooldown window");
    }

    #[test]
    fn test_cooldown_monotonicity() {
        let keypad = Keypad::default();
        let mut debouncer = PressDebouncer::default();
        let tip = center_of(&keypad, Key::Digit(5));

        assert!(debouncer.try_press(tip, 1.0, &keypad).is_some());
        // Just inside the window, and exactly at the window edge: blocked.
        assert!(debouncer.try_press(tip, 1.49, &keypad).is_none());
        assert!(debouncer.try_press(tip, 1.5, &keypad).is_none());
        // Just past the window: a second dispatch.
        assert!(debouncer.try_press(tip, 1.51, &keypad).is_some());
    }

    #[test]
    fn test_miss_does_not_refresh_cooldown() {
        let keypad = Keypad::default();
        let mut debouncer = PressDebouncer::default();
        let hit_tip = center_of(&keypad, Key::Digit(7));
        // Midway between '7' and '8' falls in the gap between hit discs.
        let gap_tip = Point::new(587.5, 192.5);

        assert!(debouncer.try_press(hit_tip, 1.0, &keypad).is_some());
        assert!(debouncer.try_press(gap_tip, 1.6, &keypad).is_none());
        assert_eq!(debouncer.last_press_s(), Some(1.0));

        // Had the miss refreshed the timer, 1.7 would still be inside
        // the window; the corrected attempt must land.
        assert!(debouncer.try_press(hit_tip, 1.7, &keypad).is_some());
    }

    #[test]
    fn test_miss_inside_cooldown_is_silent() {
        let keypad = Keypad::default();
        let mut debouncer = PressDebouncer::default();
        let gap_tip = Point::new(587.5, 192.5);

        assert!(debouncer.try_press(gap_tip, 0.0, &keypad).is_none());
        assert!(debouncer.last_press_s().is_none());
    }

    #[test]
    fn test_reset() {
        let keypad = Keypad::default();
        let mut debouncer = PressDebouncer::default();
        let tip = center_of(&keypad, Key::Digit(7));

        assert!(debouncer.try_press(tip, 1.0, &keypad).is_some());
        debouncer.reset();
        // Cooldown forgotten: an immediate press is accepted again.
        assert!(debouncer.try_press(tip, 1.01, &keypad).is_some());
    }
}
