//! HitRecord and nearest-hit resolution over a list of spheres.

use crate::{Ray, Sphere};
use penumbra_math::{Interval, Vec3};

/// Record of the nearest ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t of the near root
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Index of the sphere that was hit, in scene order
    pub sphere: usize,
}

/// Find the nearest sphere struck by `ray`.
///
/// A sphere counts only when its near root lies inside `ray_t`. Among those,
/// the smallest root wins; on an exact tie the sphere listed first is kept.
pub fn nearest_hit(spheres: &[Sphere], ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
    let mut closest: Option<HitRecord> = None;
    let mut closest_so_far = ray_t.max;

    for (index, sphere) in spheres.iter().enumerate() {
        let Some((t0, _)) = sphere.intersect(ray) else {
            continue;
        };

        if ray_t.surrounds(t0) && t0 < closest_so_far {
            closest_so_far = t0;
            closest = Some(HitRecord {
                t: t0,
                p: ray.at(t0),
                sphere: index,
            });
        }
    }

    closest
}

/// True if any sphere has a near root inside `ray_t`.
pub fn any_hit(spheres: &[Sphere], ray: &Ray, ray_t: Interval) -> bool {
    spheres
        .iter()
        .filter_map(|sphere| sphere.intersect(ray))
        .any(|(t0, _)| ray_t.surrounds(t0))
}
