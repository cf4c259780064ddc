//! Pinhole camera for primary ray generation.

use crate::Ray;
use penumbra_math::Vec3;

/// Fixed pinhole camera looking down -Z.
///
/// Every primary ray starts at `eye`. Pixel (0, 0) is the top-left corner of
/// the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    /// Field of view in degrees
    fov: f32,
    eye: Vec3,

    // Cached computed values (set by initialize())
    inv_width: f32,
    inv_height: f32,
    aspect_ratio: f32,
    angle: f32,
}

impl Camera {
    /// Create a camera with the reference settings: 640x480, 30 degrees, at
    /// the origin.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 640,
            image_height: 480,
            fov: 30.0,
            eye: Vec3::ZERO,
            inv_width: 0.0,
            inv_height: 0.0,
            aspect_ratio: 1.0,
            angle: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.initialize();
        self
    }

    /// Set field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self.initialize();
        self
    }

    /// Set the point every ray starts from.
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    fn initialize(&mut self) {
        self.inv_width = 1.0 / self.image_width as f32;
        self.inv_height = 1.0 / self.image_height as f32;
        self.aspect_ratio = self.image_width as f32 / self.image_height as f32;
        self.angle = (std::f32::consts::PI * 0.5 * self.fov / 180.0).tan();
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Generate the primary ray through the center of pixel (x, y).
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let ray_x = (2.0 * ((x as f32 + 0.5) * self.inv_width) - 1.0) * self.angle * self.aspect_ratio;
        let ray_y = (1.0 - 2.0 * ((y as f32 + 0.5) * self.inv_height)) * self.angle;

        Ray::normalized(self.eye, Vec3::new(ray_x, ray_y, -1.0))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
