use std::f32::consts::TAU;

use rand::Rng;

/// Uniform sample in `[lo, hi)`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

/// Uniform angle in `[0, 2π)`.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * TAU
}

/// Frame-rate independent lerp factor: `rate * dt` clamped to `[0, 1]`.
///
/// Large `dt` spikes (tab switches) snap straight to the target instead of
/// overshooting. NaN deltas are treated as zero.
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    let d = rate * dt;
    if d.is_nan() {
        0.0
    } else {
        d.clamp(0.0, 1.0)
    }
}

/// Clamp a control scalar into `[0, 1]`; NaN reads as 0.
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
