#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear tension-to-scale curve: `base + tension * gain`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpansionCurve {
    pub base: f32,
    pub gain: f32,
}

impl ExpansionCurve {
    pub const fn new(base: f32, gain: f32) -> Self {
        Self { base, gain }
    }

    /// Evaluate the curve. `tension` is expected to be clamped already.
    pub fn at(&self, tension: f32) -> f32 {
        self.base + tension * self.gain
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MorphConfig {
    /// Fixed particle count for the engine lifetime.
    pub particle_count: usize,
    /// Approach rate per second; the per-tick lerp factor is `rate * dt` clamped to 1.
    pub damping_rate: f32,
    pub jitter_amplitude: f32,
    /// Whole-cloud rotation about +Y in radians per second.
    pub rotation_speed: f32,
    pub expansion: ExpansionCurve,
    pub fireworks_expansion: ExpansionCurve,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: 8000,
            damping_rate: 3.0,
            jitter_amplitude: 0.005,
            rotation_speed: 0.1,
            expansion: ExpansionCurve::new(1.0, 2.0),
            fireworks_expansion: ExpansionCurve::new(0.5, 8.0),
        }
    }
}
