//! Shared application state: the single-slot mailbox between the tracking
//! producer, the UI, and the morph engine.
//!
//! Each field is its own atomic cell with last-write-wins semantics. There is
//! no lock and no atomicity across fields; a reader may observe a new tension
//! next to a stale detection flag, which is harmless for a continuous signal.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::clamp_unit;
use crate::template::Template;

// ---------- Color ----------

/// 8-bit sRGB particle color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#ff0055`, the startup particle color.
    pub const DEFAULT: Rgb = Rgb::new(0xff, 0x00, 0x55);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_packed(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Components normalised to `[0, 1]`.
    pub fn to_unit_f32(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    #[error("color {0:?} must have 3 or 6 hex digits")]
    Length(String),
    #[error("color {0:?} contains a non-hex digit")]
    Digit(String),
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::Digit(s.to_string()));
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).unwrap_or(0);
        match hex.len() {
            6 => {
                let byte = |i: usize| digit(i) * 16 + digit(i + 1);
                Ok(Rgb::new(byte(0), byte(2), byte(4)))
            }
            3 => Ok(Rgb::new(digit(0) * 17, digit(1) * 17, digit(2) * 17)),
            _ => Err(ParseColorError::Length(s.to_string())),
        }
    }
}

// ---------- Control signal ----------

/// Latest hand-tracking reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlSignal {
    /// 0 = fully open hand, 1 = clenched fist.
    pub tension: f32,
    pub hand_detected: bool,
}

impl ControlSignal {
    /// No hands in view.
    pub const IDLE: ControlSignal = ControlSignal { tension: 0.0, hand_detected: false };

    pub fn new(tension: f32, hand_detected: bool) -> Self {
        Self { tension, hand_detected }
    }

    /// Tension clamped into `[0, 1]`.
    pub fn clamped_tension(&self) -> f32 {
        clamp_unit(self.tension)
    }
}

// ---------- Shared state ----------

/// Process-wide state container. Construct once and hand out `Arc` clones.
pub struct SharedState {
    template: AtomicU32,
    color: AtomicU32,
    /// f32 bit pattern; stored raw, clamped on read.
    tension: AtomicU32,
    hand_detected: AtomicBool,
}

impl SharedState {
    pub fn new(template: Template, color: Rgb) -> Self {
        Self {
            template: AtomicU32::new(template.id()),
            color: AtomicU32::new(color.to_packed()),
            tension: AtomicU32::new(0.0f32.to_bits()),
            hand_detected: AtomicBool::new(false),
        }
    }

    // --- template (UI writes, engine reads) ---

    pub fn set_template(&self, template: Template) {
        self.template.store(template.id(), Ordering::Relaxed);
    }

    /// Store a raw template id as received; unknown ids are resolved to the
    /// sphere by readers.
    pub fn set_template_id(&self, id: u32) {
        self.template.store(id, Ordering::Relaxed);
    }

    pub fn template_id(&self) -> u32 {
        self.template.load(Ordering::Relaxed)
    }

    pub fn template(&self) -> Template {
        Template::from_id(self.template_id())
    }

    // --- color (UI writes, renderer reads) ---

    pub fn set_color(&self, color: Rgb) {
        self.color.store(color.to_packed(), Ordering::Relaxed);
    }

    pub fn color(&self) -> Rgb {
        Rgb::from_packed(self.color.load(Ordering::Relaxed))
    }

    // --- control signal (tracker writes, engine and UI read) ---

    pub fn set_tension(&self, tension: f32) {
        self.tension.store(tension.to_bits(), Ordering::Relaxed);
    }

    /// Raw tension as last written, not clamped.
    pub fn raw_tension(&self) -> f32 {
        f32::from_bits(self.tension.load(Ordering::Relaxed))
    }

    /// Tension clamped into `[0, 1]`.
    pub fn tension(&self) -> f32 {
        clamp_unit(self.raw_tension())
    }

    pub fn set_hand_detected(&self, detected: bool) {
        self.hand_detected.store(detected, Ordering::Relaxed);
    }

    pub fn is_hand_detected(&self) -> bool {
        self.hand_detected.load(Ordering::Relaxed)
    }

    /// Write both control fields. The pair is not published atomically.
    pub fn set_control(&self, signal: ControlSignal) {
        self.set_tension(signal.tension);
        self.set_hand_detected(signal.hand_detected);
    }

    pub fn control(&self) -> ControlSignal {
        ControlSignal::new(self.raw_tension(), self.is_hand_detected())
    }
}

impl Default for SharedState {
    /// Starts on the heart template with the default color and no hand.
    fn default() -> Self {
        Self::new(Template::Heart, Rgb::DEFAULT)
    }
}

impl fmt::Debug for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedState")
            .field("template", &self.template_id())
            .field("color", &self.color())
            .field("tension", &self.raw_tension())
            .field("hand_detected", &self.is_hand_detected())
            .finish()
    }
}
