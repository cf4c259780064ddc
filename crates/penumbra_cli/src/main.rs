use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use penumbra_renderer::{render_with_config, ImageBuffer, RenderConfig, Scene};

mod sink;

/// Render the reference sphere scene with soft shadows and reflections.
#[derive(Parser, Debug)]
#[command(name = "penumbra", version)]
struct Args {
    /// Output image; .ppm or .png
    #[arg(short, long, default_value = "render.ppm")]
    output: PathBuf,

    /// JSON file with render settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// Maximum reflection depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Trace every pixel on the main thread
    #[arg(long)]
    single_threaded: bool,
}

impl Args {
    /// Settings file (or defaults) with command-line overrides applied.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fov) = self.fov {
            config.fov = fov;
        }
        if let Some(max_depth) = self.max_depth {
            config.trace.max_depth = max_depth;
        }
        if self.single_threaded {
            config.parallel = false;
        }

        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Invalid render config {}", path.display()))?;
    log::info!("Loaded render settings from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args.render_config()?;

    log::info!("Starting Penumbra");

    let scene = Scene::reference();
    let image = render_with_config(&scene, &config);

    save(&args.output, &image)?;
    log::info!("Saved to {}", args.output.display());
    Ok(())
}

/// Save the render, naming the output in any sink error.
fn save(output: &Path, image: &ImageBuffer) -> Result<()> {
    sink::save_image(output, image).with_context(|| {
        format!(
            "Failed to write {}x{} image to {}",
            image.width,
            image.height,
            output.display()
        )
    })
}
