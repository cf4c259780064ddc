//! Simple ray tracer example.
//!
//! Builds a small scene by hand, renders it in parallel and saves a binary PPM.
//!
//! Run with: cargo run --example simple_render

use std::fs::File;
use std::io::BufWriter;

use penumbra_renderer::{
    render_with_config, Color, ImageBuffer, LightGroup, RenderConfig, Scene, SceneResult, Sphere,
    Vec3,
};

fn main() {
    env_logger::init();

    let scene = build_scene().expect("Scene should be valid");

    let config = RenderConfig {
        width: 400,
        height: 300,
        fov: 40.0,
        ..Default::default()
    };

    let image = render_with_config(&scene, &config);

    let filename = "simple_render.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> SceneResult<Scene> {
    let spheres = vec![
        // Ground
        Sphere::new(Vec3::new(0.0, -1004.0, -20.0), 1000.0, Color::new(0.4, 0.4, 0.45), true),
        // Mirror ball flanked by two matte ones
        Sphere::new(Vec3::new(0.0, -1.0, -18.0), 3.0, Color::new(0.8, 0.8, 0.8), true),
        Sphere::new(Vec3::new(-6.0, -2.0, -16.0), 2.0, Color::new(0.9, 0.2, 0.2), false),
        Sphere::new(Vec3::new(6.0, -2.0, -16.0), 2.0, Color::new(0.2, 0.4, 0.9), false),
    ];

    // One large soft light and one tight one
    let lights = vec![
        LightGroup::cross(Vec3::new(-30.0, 50.0, 20.0), 4.0),
        LightGroup::new(vec![Vec3::new(40.0, 30.0, 0.0)]),
    ];

    Scene::new(spheres, lights)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(filename)?);
    image.write_ppm(&mut writer)
}
