use std::sync::Arc;

use glam::Vec3;
use proptest::prelude::*;

use morph_core::{MorphConfig, MorphEngine, SharedState, Template};

fn engine_with(template: Template, count: usize, seed: u64) -> MorphEngine {
    let state = Arc::new(SharedState::default());
    state.set_template(template);
    let config = MorphConfig { particle_count: count, ..MorphConfig::default() };
    MorphEngine::seeded(config, state, seed)
}

fn mean_distance_to_goal(engine: &MorphEngine, expansion: f32) -> f32 {
    let total: f32 = engine
        .positions()
        .iter()
        .zip(engine.targets().iter())
        .map(|(c, t)| c.distance(*t * expansion))
        .sum();
    total / engine.particle_count() as f32
}

#[test]
fn test_expansion_curve() {
    let e = engine_with(Template::Heart, 8, 0);
    assert_eq!(e.expansion(Template::Fireworks, 0.0), 0.5);
    assert_eq!(e.expansion(Template::Fireworks, 1.0), 8.5);
    for t in [Template::Sphere, Template::Heart, Template::Flower, Template::Saturn, Template::Spirit] {
        assert_eq!(e.expansion(t, 0.0), 1.0, "{} at rest", t);
        assert_eq!(e.expansion(t, 1.0), 3.0, "{} clenched", t);
    }
}

#[test]
fn test_expansion_clamps_out_of_range_tension() {
    let e = engine_with(Template::Heart, 8, 0);
    assert_eq!(e.expansion(Template::Flower, -5.0), e.expansion(Template::Flower, 0.0));
    assert_eq!(e.expansion(Template::Flower, 5.0), e.expansion(Template::Flower, 1.0));
    assert_eq!(e.expansion(Template::Fireworks, 5.0), 8.5);
}

#[test]
fn test_buffers_sized_to_particle_count() {
    let e = engine_with(Template::Saturn, 8000, 1);
    assert_eq!(e.particle_count(), 8000);
    assert_eq!(e.positions().len(), 8000);
    assert_eq!(e.targets().len(), 8000);
    assert_eq!(e.as_flat().len(), 8000 * 3);
}

#[test]
fn test_default_config_uses_8000_particles() {
    let e = MorphEngine::new(MorphConfig::default(), Arc::new(SharedState::default()));
    assert_eq!(e.particle_count(), 8000);
    assert_eq!(e.active_template(), Template::Heart);
}

#[test]
fn test_particles_start_at_origin() {
    let e = engine_with(Template::Flower, 100, 2);
    assert!(e.positions().iter().all(|p| *p == Vec3::ZERO));
}

#[test]
fn test_single_tick_with_full_damp_reaches_expanded_target() {
    let mut e = engine_with(Template::Flower, 2000, 3);
    e.state().set_tension(0.5);
    let expansion = e.expansion(Template::Flower, 0.5);
    assert_eq!(expansion, 2.0);

    // dt = 1s => damp = min(3 * 1, 1) = 1
    e.tick(1.0, 0.7);

    for (c, t) in e.positions().iter().zip(e.targets().iter()) {
        let goal = *t * expansion;
        let d = (*c - goal).abs();
        assert!(
            d.x <= 0.005 + 1e-5 && d.y <= 0.005 + 1e-5 && d.z <= 1e-5,
            "current {:?} not within jitter of goal {:?}", c, goal
        );
    }
}

#[test]
fn test_fireworks_explodes_with_tension() {
    let mut e = engine_with(Template::Fireworks, 500, 4);
    e.config.jitter_amplitude = 0.0;

    e.tick(1.0, 0.0);
    let rest = e.positions()[10].length();

    e.state().set_tension(1.0);
    e.tick(1.0, 1.0);
    let burst = e.positions()[10].length();

    assert!((rest - 0.2 * 0.5).abs() < 1e-5, "resting fireworks radius {}", rest);
    assert!((burst - 0.2 * 8.5).abs() < 1e-4, "burst fireworks radius {}", burst);
}

#[test]
fn test_template_switch_morphs_without_jump() {
    let mut e = engine_with(Template::Heart, 1000, 5);
    e.config.jitter_amplitude = 0.0;
    e.tick(1.0, 0.0);
    let heart = e.positions().clone();

    e.state().set_template(Template::Saturn);
    e.tick(0.05, 0.05);
    assert_eq!(e.active_template(), Template::Saturn);
    assert_eq!(e.targets().len(), 1000);
    assert_eq!(e.positions().len(), 1000);

    // One small step moves only 15% of the way: nothing teleports.
    for (i, (now, before)) in e.positions().iter().zip(heart.iter()).enumerate() {
        let goal = e.targets()[i];
        let expected = *before + (goal - *before) * 0.15;
        assert!((*now - expected).length() < 1e-4, "particle {} jumped: {:?} vs {:?}", i, now, expected);
    }

    let mut last = mean_distance_to_goal(&e, 1.0);
    for k in 0..20 {
        e.tick(0.05, 0.1 + k as f32 * 0.05);
        let d = mean_distance_to_goal(&e, 1.0);
        assert!(d < last, "distance to new target must shrink: {} -> {} at tick {}", last, d, k);
        last = d;
    }
}

#[test]
fn test_template_switch_keeps_particle_identity() {
    let mut e = engine_with(Template::Sphere, 300, 6);
    e.on_template_changed(Template::Fireworks);
    let small = e.targets().clone();
    e.on_template_changed(Template::Sphere);
    // Sphere and fireworks share the spiral: same index, same direction.
    for (a, b) in small.iter().zip(e.targets().iter()) {
        assert!((a.normalize() - b.normalize()).length() < 1e-4);
    }
}

#[test]
fn test_unknown_template_id_falls_back_to_sphere() {
    let mut e = engine_with(Template::Heart, 200, 7);
    e.state().set_template_id(42);
    e.tick(0.016, 0.0);
    assert_eq!(e.active_template(), Template::Sphere);
    for p in e.targets().iter() {
        assert!((p.length() - 2.0).abs() < 1e-4, "fallback sphere radius wrong: {:?}", p);
    }
}

#[test]
fn test_regeneration_only_on_change() {
    let mut e = engine_with(Template::Heart, 200, 8);
    let before = e.targets().clone();
    for k in 0..5 {
        e.tick(0.016, k as f32 * 0.016);
    }
    assert_eq!(e.targets(), &before, "targets must not regenerate without a template change");
}

#[test]
fn test_rotation_is_not_baked_into_points() {
    let mut e = engine_with(Template::Saturn, 200, 9);
    e.config.jitter_amplitude = 0.0;
    for k in 0..10 {
        e.tick(1.0, k as f32);
    }
    assert!(e.rotation_y() > 0.9, "rotation should have advanced: {}", e.rotation_y());
    for (c, t) in e.positions().iter().zip(e.targets().iter()) {
        assert!((*c - *t).length() < 1e-5, "position {:?} drifted from target {:?}", c, t);
    }
    let m = e.rotation();
    let rotated = m * Vec3::X;
    assert!((rotated.length() - 1.0).abs() < 1e-6);
}

#[test]
fn test_tension_written_from_another_thread() {
    let mut e = engine_with(Template::Flower, 100, 10);
    let state = Arc::clone(e.state());
    std::thread::spawn(move || state.set_tension(1.0))
        .join()
        .expect("writer thread");
    e.tick(1.0, 0.0);
    let goal = e.targets()[0] * 3.0;
    assert!((e.positions()[0] - goal).length() < 0.01);
}

fn run_with_tension(tension: f32) -> Vec<Vec3> {
    let mut e = engine_with(Template::Spirit, 256, 11);
    e.state().set_tension(tension);
    for k in 0..4 {
        e.tick(0.1, k as f32 * 0.1);
    }
    e.positions().as_slice().to_vec()
}

#[test]
fn test_out_of_range_tension_matches_bounds() {
    assert_eq!(run_with_tension(-5.0), run_with_tension(0.0));
    assert_eq!(run_with_tension(5.0), run_with_tension(1.0));
}

proptest! {
    #[test]
    fn prop_lengths_stay_fixed_across_switches(ids in proptest::collection::vec(0u32..10, 1..8), count in 1usize..400) {
        let mut e = engine_with(Template::Heart, count, 12);
        for (k, id) in ids.iter().enumerate() {
            e.state().set_template_id(*id);
            e.tick(0.016, k as f32 * 0.016);
            prop_assert_eq!(e.positions().len(), count);
            prop_assert_eq!(e.targets().len(), count);
            prop_assert_eq!(e.active_template(), Template::from_id(*id));
        }
    }
}
