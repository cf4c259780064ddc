//! Sphere primitive for ray tracing.

use crate::{Color, Ray};
use penumbra_math::Vec3;

/// A sphere with a flat surface color.
///
/// `specular` marks the surface as a mirror: the tracer follows a reflection
/// ray from it, up to the configured recursion depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub surface_color: Color,
    pub specular: bool,
}

impl Sphere {
    /// Create a new sphere. The radius is checked when the sphere is put into a
    /// [`Scene`](crate::Scene), not here.
    pub fn new(center: Vec3, radius: f32, surface_color: Color, specular: bool) -> Self {
        Self {
            center,
            radius,
            surface_color,
            specular,
        }
    }

    /// Intersect the line through `ray` with this sphere.
    ///
    /// Returns the near and far roots `(t0, t1)` with `t0 <= t1`. Both are
    /// reported whatever their sign; callers decide which roots they accept.
    /// A sphere whose center projects behind the ray origin counts as a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        let l = self.center - ray.origin();
        let tca = l.dot(ray.direction());
        if tca < 0.0 {
            return None;
        }

        let r2 = self.radius * self.radius;
        let d2 = l.dot(l) - tca * tca;
        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        Some((tca - thc, tca + thc))
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
