//! Penumbra - recursive ray tracer for sphere scenes lit by area lights.
//!
//! Area lights are sets of point samples, which gives soft shadow edges.
//! Surfaces use Lambert diffuse plus a Phong highlight; mirror spheres add a
//! bounded chain of reflection rays.
//!
//! ```ignore
//! use penumbra_renderer::{render_with_config, RenderConfig, Scene};
//!
//! let image = render_with_config(&Scene::reference(), &RenderConfig::default());
//! let rgb = image.to_rgb8();
//! ```

mod bucket;
mod camera;
mod hittable;
mod renderer;
mod scene;
mod shading;
mod shadow;
mod sphere;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::HitRecord;
pub use renderer::{
    clamp_color, color_to_rgb8, render, render_pixel, render_with_config, ImageBuffer, RenderConfig,
};
pub use scene::{LightGroup, Scene, SceneError, SceneResult};
pub use shading::{diffuse, direct_illumination, phong, ShadingParams};
pub use shadow::is_occluded;
pub use sphere::Sphere;
pub use tracer::{reflect, TraceConfig, TraceStats, Tracer, MAX_DEPTH, REJECTION_THRESHOLD};

/// Re-export Vec3 and common math types from penumbra_math
pub use penumbra_math::{Interval, Ray, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
