//! Recursive Whitted-style tracer.
//!
//! Each call resolves the nearest hit, shades it with direct light, and for
//! mirror spheres follows one reflection ray. Recursion stops at
//! `TraceConfig::max_depth`.

use penumbra_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::shading::{direct_illumination, ShadingParams};
use crate::{Color, Ray, Scene};

/// Default maximum reflection depth.
pub const MAX_DEPTH: u32 = 5;

/// Default rejection threshold for intersection roots.
///
/// Roots slightly behind the origin still count. The same value keeps shadow
/// and reflection rays off the surface they start from.
pub const REJECTION_THRESHOLD: f32 = -0.1;

/// Tracer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Deepest reflection bounce that may still recurse
    pub max_depth: u32,
    /// Color returned when a ray hits nothing
    pub background: Color,
    /// Near roots at or below this are ignored
    pub rejection_threshold: f32,
    /// Weight of direct light at a mirror hit
    pub direct_weight: f32,
    /// Weight of the reflected color at a mirror hit
    pub reflection_weight: f32,
    pub shading: ShadingParams,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            background: Color::ONE,
            rejection_threshold: REJECTION_THRESHOLD,
            direct_weight: 0.95,
            reflection_weight: 0.05,
            shading: ShadingParams::default(),
        }
    }
}

/// Counters filled in while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Calls to the tracer, primary and reflected
    pub rays: u64,
    /// Deepest recursion depth entered
    pub deepest: u32,
}

impl TraceStats {
    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.deepest = self.deepest.max(other.deepest);
    }
}

/// Traces rays against a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a TraceConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a TraceConfig) -> Self {
        Self { scene, config }
    }

    /// Color seen along `ray`, starting at recursion `depth`.
    ///
    /// `ray.direction` must be unit length.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        self.trace_recorded(ray, depth, &mut TraceStats::default())
    }

    /// Like [`Tracer::trace`], also updating `stats`.
    pub fn trace_recorded(&self, ray: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
        stats.rays += 1;
        stats.deepest = stats.deepest.max(depth);

        let config = self.config;
        let Some(hit) = self.scene.nearest_hit(ray, config.rejection_threshold) else {
            return config.background;
        };

        let direct = direct_illumination(
            self.scene,
            &hit,
            ray.direction(),
            &config.shading,
            config.rejection_threshold,
        );

        let sphere = &self.scene.spheres()[hit.sphere];
        if !sphere.specular || depth >= config.max_depth {
            return direct;
        }

        let reflected_ray = Ray::new(hit.p, reflect(ray.direction(), sphere.normal_at(hit.p)));
        let reflected = self.trace_recorded(&reflected_ray, depth + 1, stats);

        config.direct_weight * direct + config.reflection_weight * reflected
    }
}

/// Mirror `direction` about the unit normal `n`. The result is normalized.
#[inline]
pub fn reflect(direction: Vec3, n: Vec3) -> Vec3 {
    let l = -direction;
    (2.0 * n * n.dot(l) - l).normalize()
}
