//! Calculator keypad: a fixed 4x4 grid of round buttons with hit testing.
//!
//! Buttons are generated once from the layout table at construction and
//! never mutated; re-layout requires reconstructing the keypad.

use crate::geometry::{point_in_circle, Point};

// ── Key ────────────────────────────────────────────────────

/// Semantic action behind a keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit 0-9.
    Digit(u8),
    Plus,
    Minus,
    Multiply,
    Divide,
    /// Clear the expression buffer.
    Clear,
    /// Evaluate the expression buffer.
    Equals,
}

impl Key {
    /// The character appended to (or acting on) the expression buffer.
    pub fn as_char(&self) -> char {
        match self {
            Self::Digit(d) => (b'0' + d) as char,
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Clear => 'C',
            Self::Equals => '=',
        }
    }

    /// Parse a key from its display character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            'C' => Some(Self::Clear),
            '=' => Some(Self::Equals),
            _ => None,
        }
    }
}

/// Row-major key arrangement, matching the on-screen grid.
const LAYOUT: [[Key; 4]; 4] = [
    [Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::Divide],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Multiply],
    [Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Minus],
    [Key::Clear, Key::Digit(0), Key::Equals, Key::Plus],
];

// ── Button ─────────────────────────────────────────────────

/// A single round button. Immutable after layout.
#[derive(Debug, Clone, Copy)]
pub struct Button {
    /// Semantic key dispatched on press.
    pub key: Key,
    /// Top-left corner x (pixels).
    pub x: f32,
    /// Top-left corner y (pixels).
    pub y: f32,
    /// Square side length (pixels); the hit disc diameter.
    pub size: f32,
}

impl Button {
    /// Hit disc radius.
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Center of the hit disc.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.radius(), self.y + self.radius())
    }

    /// Display character for the renderer.
    pub fn label(&self) -> char {
        self.key.as_char()
    }

    /// Whether `point` falls strictly inside this button's hit disc.
    pub fn contains(&self, point: Point) -> bool {
        point_in_circle(point, self.center(), self.radius())
    }
}

// ── Config ─────────────────────────────────────────────────

/// Keypad placement and geometry.
#[derive(Debug, Clone)]
pub struct KeypadConfig {
    /// Top-left x of the grid (pixels).
    pub origin_x: f32,
    /// Top-left y of the grid (pixels).
    pub origin_y: f32,
    /// Button side length (pixels).
    pub button_size: f32,
    /// Grid pitch (pixels); the gap is pitch minus button size.
    pub pitch: f32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            origin_x: 500.0,
            origin_y: 150.0,
            button_size: 85.0,
            pitch: 90.0,
        }
    }
}

// ── Keypad ─────────────────────────────────────────────────

/// The full button grid, in row-major insertion order.
#[derive(Debug)]
pub struct Keypad {
    /// Geometry the grid was built from.
    pub config: KeypadConfig,
    buttons: Vec<Button>,
}

impl Keypad {
    /// Build the 16-button grid from the fixed layout table.
    pub fn new(config: KeypadConfig) -> Self {
        let mut buttons = Vec::with_capacity(16);
        for (row, keys) in LAYOUT.iter().enumerate() {
            for (col, &key) in keys.iter().enumerate() {
                buttons.push(Button {
                    key,
                    x: config.origin_x + col as f32 * config.pitch,
                    y: config.origin_y + row as f32 * config.pitch,
                    size: config.button_size,
                });
            }
        }
        Self { config, buttons }
    }

    /// Ordered button sequence for the external renderer.
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// The button under `point`, if any.
    ///
    /// First match in layout order wins. The default layout never
    /// overlaps, so the ordering tie-break is defensive only.
    pub fn hit_test(&self, point: Point) -> Option<&Button> {
        self.buttons.iter().find(|b| b.contains(point))
    }

    /// Look up a button by its key.
    pub fn button(&self, key: Key) -> Option<&Button> {
        self.buttons.iter().find(|b| b.key == key)
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(KeypadConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────
