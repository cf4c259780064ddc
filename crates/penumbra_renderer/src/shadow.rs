//! Shadow rays toward individual light samples.

use penumbra_math::{Interval, Vec3};

use crate::hittable;
use crate::{Ray, Scene};

/// True if some sphere blocks the path from `point` toward `sample`.
///
/// The shadow ray uses the same rejection threshold as camera rays, which is
/// what keeps a surface from shadowing itself at the ray origin. Occluders are
/// not limited to the segment: a sphere beyond the sample also blocks it.
pub fn is_occluded(scene: &Scene, point: Vec3, sample: Vec3, threshold: f32) -> bool {
    let ray = Ray::towards(point, sample);
    hittable::any_hit(scene.spheres(), &ray, Interval::above(threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, LightGroup, Sphere};

    fn scene_with(spheres: Vec<Sphere>) -> Scene {
        let lights = vec![LightGroup::new(vec![Vec3::new(0.0, 10.0, 0.0)])];
        Scene::new(spheres, lights).unwrap()
    }

    #[test]
    fn test_clear_path() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, Color::ONE, false)]);
        let top = Vec3::new(0.0, 1.0, 0.0);

        assert!(!is_occluded(&scene, top, Vec3::new(0.0, 10.0, 0.0), -0.1));
    }

    #[test]
    fn test_blocked_by_other_sphere() {
        let scene = scene_with(vec![
            Sphere::new(Vec3::ZERO, 1.0, Color::ONE, false),
            Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, Color::ONE, false),
        ]);
        let top = Vec3::new(0.0, 1.0, 0.0);

        assert!(is_occluded(&scene, top, Vec3::new(0.0, 10.0, 0.0), -0.1));
    }

    #[test]
    fn test_far_side_shadows_itself() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, Color::ONE, false)]);
        let bottom = Vec3::new(0.0, -1.0, 0.0);

        assert!(is_occluded(&scene, bottom, Vec3::new(0.0, 10.0, 0.0), -0.1));
    }

    #[test]
    fn test_sphere_behind_point_does_not_block() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, -5.0, 0.0), 1.0, Color::ONE, false)]);

        assert!(!is_occluded(&scene, Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), -0.1));
    }
}
