//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket owns its pixel vector, so workers
//! never share mutable state; the scene is only read.

use std::time::Instant;

use rayon::prelude::*;

use crate::renderer::{log_finished, render_pixel, ImageBuffer};
use crate::tracer::{TraceConfig, TraceStats, Tracer};
use crate::{Camera, Color, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image in row-major order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    pub stats: TraceStats,
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, camera: &Camera, tracer: &Tracer) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut stats = TraceStats::default();

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(camera, tracer, bucket.x + local_x, bucket.y + local_y, &mut stats);
            pixels.push(color);
        }
    }

    log::debug!(
        "Bucket {} at ({}, {}) done: {} rays",
        bucket.index,
        bucket.x,
        bucket.y,
        stats.rays
    );

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

/// Render the whole frame bucket by bucket on the rayon thread pool.
///
/// Produces exactly the same buffer as [`render`](crate::render).
pub fn render_buckets(camera: &Camera, scene: &Scene, config: &TraceConfig, bucket_size: u32) -> ImageBuffer {
    let start = Instant::now();
    let tracer = Tracer::new(scene, config);
    let buckets = generate_buckets(camera.image_width, camera.image_height, bucket_size.max(1));

    log::debug!("Rendering {} buckets of up to {}px", buckets.len(), bucket_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, &tracer))
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = TraceStats::default();

    for result in &results {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
        stats.merge(&result.stats);
    }

    log_finished(&image, &stats, start);
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_row_major_order() {
        let buckets = generate_buckets(192, 128, 64);
        assert_eq!(buckets.len(), 6); // 3x2 grid

        let corners: Vec<(u32, u32)> = buckets.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(corners, vec![(0, 0), (64, 0), (128, 0), (0, 64), (64, 64), (128, 64)]);
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_empty_image_has_no_buckets() {
        assert!(generate_buckets(0, 10, 64).is_empty());
        assert!(generate_buckets(10, 0, 64).is_empty());
    }

    #[test]
    fn test_parallel_matches_single_threaded() {
        let scene = Scene::reference();
        let config = TraceConfig::default();
        // Size not a multiple of the bucket, to cover partial buckets
        let camera = Camera::new().with_resolution(53, 37);

        let serial = render(&camera, &scene, &config);
        let parallel = render_buckets(&camera, &scene, &config, 16);
        assert_eq!(serial, parallel);

        let again = render_buckets(&camera, &scene, &config, 7);
        assert_eq!(parallel, again);
    }
}
