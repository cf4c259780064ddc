use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The tracer expects `direction` to be unit length: shading cosines and the
/// mirror reflection formula are only correct for normalized vectors. Use
/// [`Ray::normalized`] when the direction comes from an arbitrary offset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is stored as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray whose direction is normalized first.
    pub fn normalized(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction.normalize())
    }

    /// Create a ray from `origin` aimed at `target`.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::normalized(origin, target - origin)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_normalized() {
        let ray = Ray::normalized(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_ray_towards() {
        let ray = Ray::towards(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 11.0, 1.0));
        assert_eq!(ray.direction, Vec3::Y);
        assert_eq!(ray.at(10.0), Vec3::new(1.0, 11.0, 1.0));
    }
}
