use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use morph_core::tracking::{HandLandmarks, HandTracker, LANDMARKS_PER_HAND};
use morph_core::{MorphConfig, MorphEngine, Rgb, SharedState, Template};

fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

/// Browser-facing morph world: engine, shared state, and tension tracker.
///
/// The renderer calls `tick` once per animation frame and reads the
/// position buffer straight out of wasm memory.
#[wasm_bindgen]
pub struct MorphWorld {
    engine: MorphEngine,
    state: Arc<SharedState>,
    tracker: HandTracker,
    landmarks: Vec<HandLandmarks>,
}

#[wasm_bindgen]
impl MorphWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize) -> MorphWorld {
        let state = Arc::new(SharedState::default());
        let config = MorphConfig { particle_count, ..MorphConfig::default() };
        let engine = MorphEngine::new(config, Arc::clone(&state));

        log(&format!(
            "WASM MorphWorld created: {} particles, template {}",
            engine.particle_count(),
            engine.active_template()
        ));

        MorphWorld {
            engine,
            state,
            tracker: HandTracker::new(),
            landmarks: Vec::with_capacity(2),
        }
    }

    /// Advance one frame. Returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32, time: f32) -> f32 {
        let start = js_sys::Date::now();
        self.engine.tick(dt, time);
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    /// Pointer to `3 * particle_count` interleaved `f32` coordinates.
    #[wasm_bindgen]
    pub fn positions_ptr(&self) -> *const f32 {
        self.engine.as_flat().as_ptr()
    }

    #[wasm_bindgen]
    pub fn positions_byte_length(&self) -> usize {
        std::mem::size_of_val(self.engine.as_flat())
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.engine.particle_count()
    }

    /// True when the position buffer changed since the last call.
    #[wasm_bindgen]
    pub fn take_dirty(&mut self) -> bool {
        self.engine.take_dirty()
    }

    /// Whole-cloud yaw in radians; apply as the points object's rotation.
    #[wasm_bindgen]
    pub fn rotation_y(&self) -> f32 {
        self.engine.rotation_y()
    }

    /// Select a template by name. Unknown names select the sphere.
    #[wasm_bindgen]
    pub fn set_template(&mut self, name: &str) {
        let template = name.parse::<Template>().unwrap_or_else(|err| {
            warn(&format!("{err}, using sphere"));
            Template::Sphere
        });
        self.state.set_template(template);
    }

    /// Select a template by numeric id. Unknown ids render the sphere.
    #[wasm_bindgen]
    pub fn set_template_id(&mut self, id: u32) {
        self.state.set_template_id(id);
    }

    /// Name of the template the engine is currently morphing toward.
    #[wasm_bindgen]
    pub fn template(&self) -> String {
        self.engine.active_template().name().to_string()
    }

    /// Set the particle color from a hex string. Invalid input keeps the
    /// previous color.
    #[wasm_bindgen]
    pub fn set_color(&mut self, hex: &str) {
        match hex.parse::<Rgb>() {
            Ok(color) => self.state.set_color(color),
            Err(err) => warn(&format!("{err}")),
        }
    }

    /// Particle color as `#rrggbb`.
    #[wasm_bindgen]
    pub fn color(&self) -> String {
        self.state.color().to_string()
    }

    /// Particle color as normalised `[r, g, b]`.
    #[wasm_bindgen]
    pub fn color_rgb(&self) -> Vec<f32> {
        self.state.color().to_unit_f32().to_vec()
    }

    #[wasm_bindgen]
    pub fn set_hand_tension(&mut self, tension: f32) {
        self.state.set_tension(tension);
    }

    #[wasm_bindgen]
    pub fn set_hand_detected(&mut self, detected: bool) {
        self.state.set_hand_detected(detected);
    }

    /// Feed one camera frame of landmarks: `hand_count` hands of 21 `x, y, z`
    /// triples each. Incomplete hands are skipped. Returns the derived tension.
    #[wasm_bindgen]
    pub fn push_hand_landmarks(&mut self, flat: &[f32], hand_count: usize) -> f32 {
        let stride = LANDMARKS_PER_HAND * 3;
        self.landmarks.clear();
        self.landmarks.extend(
            flat.chunks(stride)
                .take(hand_count)
                .filter_map(HandLandmarks::from_flat),
        );
        self.tracker.publish(&self.state, &self.landmarks).tension
    }

    #[wasm_bindgen]
    pub fn hand_tension(&self) -> f32 {
        self.state.tension()
    }

    #[wasm_bindgen]
    pub fn is_hand_detected(&self) -> bool {
        self.state.is_hand_detected()
    }

    /// Reseed the random source used for future template generation.
    #[wasm_bindgen]
    pub fn reseed(&mut self, seed: u32) {
        self.engine.set_rng(StdRng::seed_from_u64(seed as u64));
    }
}
