//! Direct lighting: Lambert diffuse plus a Phong highlight, averaged over the
//! samples of every area light.

use penumbra_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::hittable::HitRecord;
use crate::shadow::is_occluded;
use crate::{Color, Scene};

/// Phong coefficients shared by every surface in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    /// Diffuse reflection constant
    pub kd: f32,
    /// Specular reflection constant
    pub ks: f32,
    /// Shininess exponent
    pub alpha: f32,
    /// Color of the specular highlight
    pub specular_color: Color,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            kd: 1.0,
            ks: 3.0,
            alpha: 100.0,
            specular_color: Color::ONE,
        }
    }
}

/// Lambertian term for a unit light direction `l` and unit normal `n`.
#[inline]
pub fn diffuse(l: Vec3, n: Vec3, diffuse_color: Color, kd: f32) -> Color {
    kd * l.dot(n).max(0.0) * diffuse_color
}

/// Diffuse plus Phong specular for one light direction.
///
/// `l` points from the surface to the light, `n` is the surface normal and
/// `v` points toward the viewer. All three must be unit length.
pub fn phong(l: Vec3, n: Vec3, v: Vec3, diffuse_color: Color, params: &ShadingParams) -> Color {
    let r = (2.0 * n * n.dot(l) - l).normalize();
    let highlight = r.dot(v).max(0.0).powf(params.alpha);

    diffuse(l, n, diffuse_color, params.kd) + params.ks * highlight * params.specular_color
}

/// Light arriving directly at `hit` from every unoccluded light sample.
///
/// Each light group carries the same total weight `1 / group_count`, split
/// evenly among its own samples, so a group with more samples is smoother but
/// not brighter. `incoming` is the unit direction of the ray that produced
/// the hit.
pub fn direct_illumination(
    scene: &Scene,
    hit: &HitRecord,
    incoming: Vec3,
    params: &ShadingParams,
    threshold: f32,
) -> Color {
    let sphere = &scene.spheres()[hit.sphere];
    let n = sphere.normal_at(hit.p);
    let v = -incoming;
    let group_count = scene.light_groups().len() as f32;

    let mut color = Color::ZERO;
    for group in scene.light_groups() {
        let weight = 1.0 / (group_count * group.len() as f32);

        for &sample in group.samples() {
            if is_occluded(scene, hit.p, sample, threshold) {
                continue;
            }

            let l = (sample - hit.p).normalize();
            color += phong(l, n, v, sphere.surface_color, params) * weight;
        }
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LightGroup, Sphere};

    const EPS: f32 = 1e-4;

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).abs().max_element() < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn test_diffuse_clamps_back_facing() {
        let n = Vec3::Y;
        assert_eq!(diffuse(Vec3::NEG_Y, n, Color::ONE, 1.0), Color::ZERO);
        assert_color_eq(diffuse(Vec3::Y, n, Color::new(0.2, 0.4, 0.6), 0.5), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_phong_mirror_direction() {
        // Light, normal and viewer aligned: full diffuse plus full highlight
        let params = ShadingParams::default();
        let c = phong(Vec3::Y, Vec3::Y, Vec3::Y, Color::new(0.5, 0.25, 1.0), &params);
        assert_color_eq(c, Color::new(3.5, 3.25, 4.0));
    }

    #[test]
    fn test_phong_highlight_falls_off() {
        // 45 degrees off the mirror direction: highlight ~ cos^100 vanishes
        let params = ShadingParams::default();
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let c = phong(l, Vec3::Y, Vec3::Y, Color::ONE, &params);
        assert_color_eq(c, Color::splat(std::f32::consts::FRAC_1_SQRT_2));
    }

    // Unit sphere at the origin, shaded at its top point and viewed from above.
    // Group A sits straight overhead. Group B sits up and to the side, along a
    // line that the occluder sphere can block without touching group A.
    fn fixture(with_occluder: bool) -> (Scene, HitRecord) {
        let mut spheres = vec![Sphere::new(Vec3::ZERO, 1.0, Color::new(0.5, 0.25, 1.0), false)];
        if with_occluder {
            spheres.push(Sphere::new(Vec3::new(5.0, 6.0, 0.0), 1.0, Color::ONE, false));
        }

        let lights = vec![
            LightGroup::new(vec![Vec3::new(0.0, 10.0, 0.0)]),
            LightGroup::new(vec![Vec3::new(10.0, 11.0, 0.0), Vec3::new(9.0, 10.0, 0.0)]),
        ];

        let hit = HitRecord {
            t: 4.0,
            p: Vec3::new(0.0, 1.0, 0.0),
            sphere: 0,
        };
        (Scene::new(spheres, lights).unwrap(), hit)
    }

    #[test]
    fn test_unblocked_groups_share_equally() {
        let (scene, hit) = fixture(false);
        let params = ShadingParams::default();
        let c = direct_illumination(&scene, &hit, Vec3::NEG_Y, &params, -0.1);

        // A: (color + 3 white) / 2. B: both samples at 45 degrees, each
        // weighted 1/4, diffuse only since the highlight is ~1e-15.
        let a = (Color::new(0.5, 0.25, 1.0) + Color::splat(3.0)) * 0.5;
        let b = Color::new(0.5, 0.25, 1.0) * std::f32::consts::FRAC_1_SQRT_2 * 0.5;
        assert_color_eq(c, a + b);
    }

    #[test]
    fn test_blocked_group_contributes_nothing() {
        let (scene, hit) = fixture(true);
        let params = ShadingParams::default();
        let c = direct_illumination(&scene, &hit, Vec3::NEG_Y, &params, -0.1);

        let a = (Color::new(0.5, 0.25, 1.0) + Color::splat(3.0)) * 0.5;
        assert_color_eq(c, a);
    }

    #[test]
    fn test_all_lights_below_horizon() {
        let spheres = vec![Sphere::new(Vec3::ZERO, 1.0, Color::ONE, false)];
        let lights = vec![LightGroup::cross(Vec3::new(0.0, -10.0, 0.0), 1.0)];
        let scene = Scene::new(spheres, lights).unwrap();
        let hit = HitRecord {
            t: 4.0,
            p: Vec3::new(0.0, 1.0, 0.0),
            sphere: 0,
        };

        let c = direct_illumination(&scene, &hit, Vec3::NEG_Y, &ShadingParams::default(), -0.1);
        assert_eq!(c, Color::ZERO);
    }
}
