//! Hand openness to tension.
//!
//! The landmark model itself runs elsewhere; this module turns its output
//! (21 normalised landmarks per hand) into the scalar written to
//! [`SharedState`].

use glam::Vec3;

use crate::math::clamp_unit;
use crate::state::{ControlSignal, SharedState};

pub const LANDMARKS_PER_HAND: usize = 21;
pub const WRIST: usize = 0;
/// Thumb, index, middle, ring, pinky tips.
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Mean tip-to-wrist distance of a closed fist, in normalised landmark units.
pub const CLOSED_REACH: f32 = 0.1;
/// Mean tip-to-wrist distance of a fully open hand.
pub const OPEN_REACH: f32 = 0.4;

/// One detected hand: landmark positions in normalised image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks(pub [Vec3; LANDMARKS_PER_HAND]);

impl HandLandmarks {
    /// Build from a flat `x, y, z` slice. Returns `None` when fewer than
    /// 21 landmarks are present.
    pub fn from_flat(flat: &[f32]) -> Option<Self> {
        if flat.len() < LANDMARKS_PER_HAND * 3 {
            return None;
        }
        let mut points = [Vec3::ZERO; LANDMARKS_PER_HAND];
        for (p, xyz) in points.iter_mut().zip(flat.chunks_exact(3)) {
            *p = Vec3::new(xyz[0], xyz[1], xyz[2]);
        }
        Some(Self(points))
    }

    /// Mean Euclidean distance from the five fingertips to the wrist.
    pub fn mean_reach(&self) -> f32 {
        let wrist = self.0[WRIST];
        let total: f32 = FINGERTIPS.iter().map(|&tip| self.0[tip].distance(wrist)).sum();
        total / FINGERTIPS.len() as f32
    }

    /// Tension of this hand: 0 when open, 1 when clenched.
    pub fn tension(&self) -> f32 {
        1.0 - clamp_unit((self.mean_reach() - CLOSED_REACH) / (OPEN_REACH - CLOSED_REACH))
    }
}

impl ControlSignal {
    /// Average tension over all hands; no hands reads as idle.
    pub fn from_hands(hands: &[HandLandmarks]) -> Self {
        if hands.is_empty() {
            return ControlSignal::IDLE;
        }
        let total: f32 = hands.iter().map(HandLandmarks::tension).sum();
        ControlSignal::new(total / hands.len() as f32, true)
    }
}

/// Publishes landmark frames into the shared state at camera cadence.
#[derive(Debug, Default)]
pub struct HandTracker {
    frames: u64,
}

impl HandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the control signal for one camera frame and overwrite the
    /// shared slot with it.
    pub fn publish(&mut self, state: &SharedState, hands: &[HandLandmarks]) -> ControlSignal {
        let signal = ControlSignal::from_hands(hands);
        let was_detected = state.is_hand_detected();
        state.set_control(signal);
        self.frames += 1;
        if was_detected != signal.hand_detected {
            tracing::debug!(
                detected = signal.hand_detected,
                hands = hands.len(),
                frame = self.frames,
                "hand detection changed"
            );
        }
        signal
    }

    /// Frames published so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
