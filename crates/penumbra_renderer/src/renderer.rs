//! Frame rendering.
//!
//! Maps every pixel to a primary ray, traces it at depth 0 and stores the
//! clamped color in an [`ImageBuffer`]. No randomness is involved, so the same
//! scene and configuration always produce the same buffer.

use std::io::{self, Write};
use std::time::Instant;

use penumbra_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};

use crate::bucket::render_buckets;
use crate::tracer::{TraceConfig, TraceStats, Tracer};
use crate::{Camera, Color, Scene, DEFAULT_BUCKET_SIZE};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Field of view in degrees
    pub fov: f32,
    /// Camera position
    pub eye: Vec3,
    /// Edge length of a parallel render tile
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    pub trace: TraceConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov: 30.0,
            eye: Vec3::ZERO,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
            trace: TraceConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Camera matching this configuration.
    pub fn camera(&self) -> Camera {
        Camera::new()
            .with_resolution(self.width, self.height)
            .with_fov(self.fov)
            .with_eye(self.eye)
    }

    /// Log settings that are legal but probably not intended.
    pub fn warn_suspicious(&self) {
        let blend = self.trace.direct_weight + self.trace.reflection_weight;
        if (blend - 1.0).abs() > 1e-3 {
            log::warn!("Reflection blend weights sum to {blend:.3}, not 1");
        }
        if self.width == 0 || self.height == 0 {
            log::warn!("Empty image: {}x{}", self.width, self.height);
        }
        if self.bucket_size == 0 {
            log::warn!("Bucket size 0, falling back to {DEFAULT_BUCKET_SIZE}");
        }
    }
}

/// Clamp each channel to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Convert a color to 8-bit RGB, truncating after clamping.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = clamp_color(color);
    [
        (255.0 * c.x) as u8,
        (255.0 * c.y) as u8,
        (255.0 * c.z) as u8,
    ]
}

/// Trace a single pixel, returning its clamped color.
pub fn render_pixel(
    camera: &Camera,
    tracer: &Tracer,
    x: u32,
    y: u32,
    stats: &mut TraceStats,
) -> Color {
    let ray = camera.ray_for_pixel(x, y);
    clamp_color(tracer.trace_recorded(&ray, 0, stats))
}

/// Row-major image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Flat RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }

    /// Write the image as binary PPM (`P6`) and flush `writer`.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(&self.to_rgb8())?;
        writer.flush()
    }
}

/// Render the whole frame on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &TraceConfig) -> ImageBuffer {
    let start = Instant::now();
    let tracer = Tracer::new(scene, config);
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = TraceStats::default();

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, &tracer, x, y, &mut stats);
            image.set(x, y, color);
        }
    }

    log_finished(&image, &stats, start);
    image
}

/// Render with the settings in `config`, in parallel if requested.
pub fn render_with_config(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    config.warn_suspicious();
    let camera = config.camera();

    log::info!(
        "Rendering {}x{} at {} degrees, max depth {}{}",
        camera.image_width,
        camera.image_height,
        camera.fov(),
        config.trace.max_depth,
        if config.parallel { " (parallel)" } else { "" }
    );

    if config.parallel {
        let bucket_size = if config.bucket_size == 0 {
            DEFAULT_BUCKET_SIZE
        } else {
            config.bucket_size
        };
        render_buckets(&camera, scene, &config.trace, bucket_size)
    } else {
        render(&camera, scene, &config.trace)
    }
}

pub(crate) fn log_finished(image: &ImageBuffer, stats: &TraceStats, start: Instant) {
    log::info!(
        "Rendered {}x{} in {:?}: {} rays, deepest bounce {}",
        image.width,
        image.height,
        start.elapsed(),
        stats.rays,
        stats.deepest
    );
}
