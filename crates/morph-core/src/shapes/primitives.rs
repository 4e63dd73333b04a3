//! Point-cloud generators, one per template.
//!
//! Every generator returns exactly `count` points centred near the origin.
//! Stochastic generators draw from the injected `rng`, so a seeded source
//! reproduces the same cloud.

use std::f64::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::math::{random_angle, uniform};
use crate::particle::PointCloud;

/// Sphere radius for the default / unknown template.
pub const FALLBACK_SPHERE_RADIUS: f32 = 2.0;

pub const HEART_SCALE: f32 = 0.15;
pub const HEART_DEPTH: f32 = 2.0;

pub const FLOWER_PETALS: f32 = 5.0;

pub const SATURN_PLANET_PERCENT: usize = 40;
pub const SATURN_PLANET_RADIUS: f32 = 1.5;
pub const SATURN_RING_INNER: f32 = 2.2;
pub const SATURN_RING_OUTER: f32 = 3.7;
pub const SATURN_RING_HALF_THICKNESS: f32 = 0.05;

pub const SPIRIT_HEAD_PERCENT: usize = 15;
pub const SPIRIT_TORSO_PERCENT: usize = 35;
pub const SPIRIT_HEAD_RADIUS: f32 = 0.6;
pub const SPIRIT_HEAD_LIFT: f32 = 1.8;
pub const SPIRIT_TORSO_RADIUS: f32 = 1.1;
pub const SPIRIT_TORSO_AXES: Vec3 = Vec3::new(0.9, 1.2, 0.8);
pub const SPIRIT_TORSO_LIFT: f32 = 0.5;
pub const SPIRIT_BASE_RADIUS: f32 = 2.0;
pub const SPIRIT_BASE_DEPTH: f32 = 0.8;

pub const FIREWORKS_RADIUS: f32 = 0.2;

/// Points a sub-region gets out of `count`: `percent`% rounded down.
/// Whatever is left after all shares goes to the final region.
pub fn region_share(count: usize, percent: usize) -> usize {
    count.saturating_mul(percent) / 100
}

// ---------- Sphere ----------

/// Point `i` of a `count`-point equal-area spiral on a sphere.
///
/// Evaluated in f64 so the spiral phase stays exact for large counts.
pub fn sphere_point(i: usize, count: usize, radius: f32) -> Vec3 {
    let phi = (-1.0 + 2.0 * i as f64 / count as f64).acos();
    let theta = (count as f64 * PI).sqrt() * phi;
    let r = radius as f64;
    Vec3::new(
        (r * theta.cos() * phi.sin()) as f32,
        (r * theta.sin() * phi.sin()) as f32,
        (r * phi.cos()) as f32,
    )
}

/// Append a `count`-point spiral sphere of `radius`, shifted by `offset`.
pub fn extend_sphere(out: &mut PointCloud, count: usize, radius: f32, offset: Vec3) {
    out.extend((0..count).map(|i| sphere_point(i, count, radius) + offset));
}

/// Deterministic spiral sphere.
pub fn shape_sphere(count: usize, radius: f32) -> PointCloud {
    let mut out = PointCloud::with_capacity(count);
    extend_sphere(&mut out, count, radius, Vec3::ZERO);
    out
}

// ---------- Heart ----------

/// Classic heart curve at parameter `t`, unscaled. Returns `(x, y)`.
pub fn heart_curve(t: f32) -> (f32, f32) {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    (x, y)
}

/// Heart silhouette in the XY plane with random depth jitter.
pub fn shape_heart<R: Rng + ?Sized>(count: usize, rng: &mut R) -> PointCloud {
    (0..count)
        .map(|_| {
            let (x, y) = heart_curve(random_angle(rng));
            let z = uniform(rng, -HEART_DEPTH, HEART_DEPTH);
            Vec3::new(x * HEART_SCALE, y * HEART_SCALE, z)
        })
        .collect()
}

// ---------- Flower ----------

/// Rosette radius `sin(5θ) + 2`, always in `[1, 3]`.
pub fn rosette_radius(theta: f32) -> f32 {
    (FLOWER_PETALS * theta).sin() + 2.0
}

/// Five-petal rosette in the XZ plane with wavy thickness.
pub fn shape_flower<R: Rng + ?Sized>(count: usize, rng: &mut R) -> PointCloud {
    (0..count)
        .map(|_| {
            let theta = random_angle(rng);
            let r = rosette_radius(theta);
            let height = uniform(rng, -0.5, 0.5);
            Vec3::new(r * theta.cos(), height + (r * 5.0).cos() * 0.5, r * theta.sin())
        })
        .collect()
}

// ---------- Saturn ----------

/// Spiral-sphere planet (40%) with a flat random ring (remainder).
pub fn shape_saturn<R: Rng + ?Sized>(count: usize, rng: &mut R) -> PointCloud {
    let planet = region_share(count, SATURN_PLANET_PERCENT);
    let ring = count - planet;

    let mut out = PointCloud::with_capacity(count);
    extend_sphere(&mut out, planet, SATURN_PLANET_RADIUS, Vec3::ZERO);
    out.extend((0..ring).map(|_| {
        let angle = random_angle(rng);
        let dist = uniform(rng, SATURN_RING_INNER, SATURN_RING_OUTER);
        let y = uniform(rng, -SATURN_RING_HALF_THICKNESS, SATURN_RING_HALF_THICKNESS);
        Vec3::new(angle.cos() * dist, y, angle.sin() * dist)
    }));
    out
}

// ---------- Spirit ----------

/// Seated figure: head sphere (15%), ellipsoid torso (35%), flat base (rest).
pub fn shape_spirit<R: Rng + ?Sized>(count: usize, rng: &mut R) -> PointCloud {
    let head = region_share(count, SPIRIT_HEAD_PERCENT);
    let torso = region_share(count, SPIRIT_TORSO_PERCENT);
    let base = count - head - torso;

    let mut out = PointCloud::with_capacity(count);
    extend_sphere(&mut out, head, SPIRIT_HEAD_RADIUS, Vec3::new(0.0, SPIRIT_HEAD_LIFT, 0.0));

    out.extend((0..torso).map(|_| {
        let theta = random_angle(rng);
        let phi = uniform(rng, 0.0, std::f32::consts::PI);
        let r = SPIRIT_TORSO_RADIUS;
        Vec3::new(
            r * theta.cos() * phi.sin(),
            r * phi.cos(),
            r * theta.sin() * phi.sin(),
        ) * SPIRIT_TORSO_AXES
            + Vec3::new(0.0, SPIRIT_TORSO_LIFT, 0.0)
    }));

    out.extend((0..base).map(|_| {
        let theta = random_angle(rng);
        let r = uniform(rng, 0.0, SPIRIT_BASE_RADIUS);
        let y = uniform(rng, -SPIRIT_BASE_DEPTH, 0.0);
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    }));
    out
}

// ---------- Fireworks ----------

/// Tight spiral sphere; the burst comes from the engine's expansion curve.
pub fn shape_fireworks(count: usize) -> PointCloud {
    shape_sphere(count, FIREWORKS_RADIUS)
}
