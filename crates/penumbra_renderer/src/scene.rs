//! Scene description: spheres plus area lights.
//!
//! A [`Scene`] is built once, validated, and then only read while rendering.
//! It is `Sync`, so parallel bucket rendering shares it by reference.

use penumbra_math::{Interval, Vec3};
use thiserror::Error;

use crate::hittable::{self, HitRecord};
use crate::{Color, Ray, Sphere};

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene needs at least one light group")]
    NoLightGroups,

    #[error("Light group {index} has no samples")]
    EmptyLightGroup { index: usize },

    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// One extended light source, approximated by a set of point samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LightGroup {
    samples: Vec<Vec3>,
}

impl LightGroup {
    /// Create a light group from explicit sample positions.
    pub fn new(samples: Vec<Vec3>) -> Self {
        Self { samples }
    }

    /// Seven samples: the center, then `spread` offsets along +x, -x, -y, +y,
    /// -z and +z.
    pub fn cross(center: Vec3, spread: f32) -> Self {
        let offsets = [
            Vec3::ZERO,
            Vec3::X,
            Vec3::NEG_X,
            Vec3::NEG_Y,
            Vec3::Y,
            Vec3::NEG_Z,
            Vec3::Z,
        ];
        Self::new(offsets.iter().map(|o| center + *o * spread).collect())
    }

    /// Sample positions in order.
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Immutable set of spheres and light groups.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    light_groups: Vec<LightGroup>,
}

impl Scene {
    /// Build a scene, checking the preconditions the tracer relies on.
    ///
    /// Every radius must be positive and finite, and there must be at least one
    /// light group with at least one sample, since shading divides by both
    /// counts. An empty sphere list is fine: everything renders as background.
    pub fn new(spheres: Vec<Sphere>, light_groups: Vec<LightGroup>) -> SceneResult<Self> {
        if let Some((index, sphere)) = spheres
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.radius > 0.0 && s.radius.is_finite()))
        {
            return Err(SceneError::InvalidRadius {
                index,
                radius: sphere.radius,
            });
        }

        if light_groups.is_empty() {
            return Err(SceneError::NoLightGroups);
        }

        if let Some(index) = light_groups.iter().position(LightGroup::is_empty) {
            return Err(SceneError::EmptyLightGroup { index });
        }

        log::debug!(
            "Scene with {} spheres, {} light groups, {} light samples",
            spheres.len(),
            light_groups.len(),
            light_groups.iter().map(LightGroup::len).sum::<usize>()
        );

        Ok(Self {
            spheres,
            light_groups,
        })
    }

    /// The reference scene: a huge ground sphere, six smaller spheres, and
    /// three cross-shaped area lights above and in front of them.
    pub fn reference() -> Self {
        let spheres = vec![
            Sphere::new(Vec3::new(0.0, -10004.0, -20.0), 10000.0, Color::new(0.50, 0.50, 0.50), true),
            Sphere::new(Vec3::new(0.0, 0.0, -20.0), 4.0, Color::new(1.00, 0.32, 0.36), true),
            Sphere::new(Vec3::new(5.0, -1.0, -15.0), 2.0, Color::new(0.90, 0.76, 0.46), true),
            Sphere::new(Vec3::new(5.0, 0.0, -25.0), 3.0, Color::new(0.65, 0.77, 0.97), true),
            Sphere::new(Vec3::new(-5.5, 0.0, -13.0), 3.0, Color::new(0.90, 0.90, 0.90), true),
            Sphere::new(Vec3::new(3.5, 3.0, -13.0), 1.0, Color::new(1.00, 1.00, 0.00), true),
            Sphere::new(Vec3::new(-1.5, -1.5, -10.0), 0.5, Color::new(0.00, 0.50, 1.00), false),
        ];

        let light_groups = vec![
            LightGroup::cross(Vec3::new(0.0, 60.0, 60.0), 1.0),
            LightGroup::cross(Vec3::new(-60.0, 60.0, 60.0), 1.0),
            LightGroup::cross(Vec3::new(60.0, 60.0, 60.0), 1.0),
        ];

        Self {
            spheres,
            light_groups,
        }
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn light_groups(&self) -> &[LightGroup] {
        &self.light_groups
    }

    /// Nearest sphere whose near root is strictly greater than `threshold`.
    pub fn nearest_hit(&self, ray: &Ray, threshold: f32) -> Option<HitRecord> {
        hittable::nearest_hit(&self.spheres, ray, Interval::above(threshold))
    }
}
