//! Template dispatcher: selects the generator for a [`Template`].

use rand::Rng;

use crate::particle::PointCloud;
use crate::shapes::primitives::*;
use crate::template::Template;

/// Generate the unscaled target cloud for `template`.
///
/// Always yields exactly `count` points.
pub fn generate<R: Rng + ?Sized>(template: Template, count: usize, rng: &mut R) -> PointCloud {
    match template {
        Template::Heart => shape_heart(count, rng),
        Template::Flower => shape_flower(count, rng),
        Template::Saturn => shape_saturn(count, rng),
        Template::Spirit => shape_spirit(count, rng),
        Template::Fireworks => shape_fireworks(count),
        Template::Sphere => shape_sphere(count, FALLBACK_SPHERE_RADIUS),
    }
}

/// Generate by numeric id. Unrecognised ids fall back to the sphere.
pub fn generate_for_id<R: Rng + ?Sized>(id: u32, count: usize, rng: &mut R) -> PointCloud {
    if !Template::is_known_id(id) {
        tracing::warn!(id, "unknown template id, falling back to sphere");
    }
    generate(Template::from_id(id), count, rng)
}
