use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Mat3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MorphConfig;
use crate::math::{clamp_unit, damp_factor};
use crate::particle::{MorphBuffers, PointCloud};
use crate::shapes::dispatcher::generate;
use crate::state::SharedState;
use crate::template::Template;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-frame morph engine.
///
/// Owns the render buffer exclusively. Reads template and tension from the
/// shared state once per tick, regenerates the target cloud when the
/// template changes, and eases every particle toward its expanded target.
pub struct MorphEngine<R = StdRng> {
    pub config: MorphConfig,
    buffers: MorphBuffers,
    state: Arc<SharedState>,
    rng: R,
    active: Template,
    /// Raw template id from the state at the last regeneration.
    last_seen_id: u32,
    rotation_y: f32,
    dirty: bool,
}

impl MorphEngine<StdRng> {
    /// Engine with an entropy-seeded random source.
    pub fn new(config: MorphConfig, state: Arc<SharedState>) -> Self {
        Self::with_rng(config, state, StdRng::from_entropy())
    }

    /// Engine whose stochastic templates are reproducible from `seed`.
    pub fn seeded(config: MorphConfig, state: Arc<SharedState>, seed: u64) -> Self {
        Self::with_rng(config, state, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MorphEngine<R> {
    /// Allocate both buffers once and load the state's current template.
    ///
    /// Particles start at the origin and bloom out toward the first shape.
    /// A particle count of zero is raised to one.
    pub fn with_rng(mut config: MorphConfig, state: Arc<SharedState>, rng: R) -> Self {
        config.particle_count = config.particle_count.max(1);
        let last_seen_id = state.template_id();

        let mut engine = Self {
            buffers: MorphBuffers::new(config.particle_count),
            config,
            state,
            rng,
            active: Template::Sphere,
            last_seen_id,
            rotation_y: 0.0,
            dirty: true,
        };
        engine.sync_template(last_seen_id);

        tracing::info!(
            particles = engine.config.particle_count,
            template = %engine.active,
            "morph engine created"
        );
        engine
    }

    /// Regenerate the target cloud for `template`, replacing it wholesale.
    ///
    /// Current positions are untouched, so following ticks morph rather
    /// than cut.
    pub fn on_template_changed(&mut self, template: Template) {
        let shape = generate(template, self.buffers.count, &mut self.rng);
        let padded = self.buffers.load_target(&shape);
        if padded > 0 {
            tracing::warn!(%template, padded, "generator fell short, padding with origin");
        }
        self.active = template;
        tracing::debug!(%template, particles = self.buffers.count, "target regenerated");
    }

    fn sync_template(&mut self, id: u32) {
        if !Template::is_known_id(id) {
            tracing::warn!(id, "unknown template id, falling back to sphere");
        }
        self.last_seen_id = id;
        self.on_template_changed(Template::from_id(id));
    }

    /// Expansion factor for `template` at `tension` (clamped here).
    pub fn expansion(&self, template: Template, tension: f32) -> f32 {
        let tension = clamp_unit(tension);
        match template {
            Template::Fireworks => self.config.fireworks_expansion.at(tension),
            _ => self.config.expansion.at(tension),
        }
    }

    /// Advance one display frame.
    ///
    /// `dt` is the frame delta in seconds, `elapsed` the clock time used as
    /// jitter phase. Both come from the host's frame loop.
    pub fn tick(&mut self, dt: f32, elapsed: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let id = self.state.template_id();
        if id != self.last_seen_id {
            self.sync_template(id);
        }

        let expansion = self.expansion(self.active, self.state.tension());
        let damp = damp_factor(self.config.damping_rate, dt);
        let jitter = self.config.jitter_amplitude;

        let step = |(cur, tgt): (&mut Vec3, &Vec3)| {
            let goal = *tgt * expansion;
            *cur += (goal - *cur) * damp;
            // Phase reads the freshly updated coordinates, coupling the axes.
            cur.x += (elapsed + cur.y).sin() * jitter;
            cur.y += (elapsed + cur.x).cos() * jitter;
        };

        let MorphBuffers { current, target, .. } = &mut self.buffers;

        #[cfg(feature = "parallel")]
        current
            .as_mut_slice()
            .par_iter_mut()
            .zip(target.as_slice().par_iter())
            .for_each(step);

        #[cfg(not(feature = "parallel"))]
        current
            .as_mut_slice()
            .iter_mut()
            .zip(target.as_slice().iter())
            .for_each(step);

        self.rotation_y = (self.rotation_y + dt * self.config.rotation_speed).rem_euclid(TAU);
        self.dirty = true;
    }

    /// Render buffer.
    pub fn positions(&self) -> &PointCloud {
        &self.buffers.current
    }

    /// Unscaled target cloud of the active template.
    pub fn targets(&self) -> &PointCloud {
        &self.buffers.target
    }

    /// Render buffer as interleaved `x, y, z` floats.
    pub fn as_flat(&self) -> &[f32] {
        self.buffers.current.as_flat()
    }

    pub fn particle_count(&self) -> usize {
        self.buffers.count
    }

    pub fn active_template(&self) -> Template {
        self.active
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    /// Whole-cloud yaw in radians, `[0, 2π)`. Applied by the renderer as a
    /// transform; never baked into positions.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_y(self.rotation_y)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it. The renderer re-uploads the
    /// buffer when this is `true`.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Swap the random source used by future regenerations.
    pub fn set_rng(&mut self, rng: R) {
        self.rng = rng;
    }
}
