//! Particle morph field: template point clouds, a shared control state, and
//! the per-frame engine that eases a fixed particle buffer toward the active
//! template while hand tension scales it.

pub mod config;
pub mod engine;
pub mod math;
pub mod particle;
pub mod shapes;
pub mod state;
pub mod template;
pub mod tracking;

pub use config::{ExpansionCurve, MorphConfig};
pub use engine::MorphEngine;
pub use particle::{MorphBuffers, PointCloud};
pub use state::{ControlSignal, ParseColorError, Rgb, SharedState};
pub use template::{ParseTemplateError, Template};
