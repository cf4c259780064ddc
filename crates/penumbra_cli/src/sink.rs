//! Image sinks: binary PPM and PNG.
//!
//! Sinks borrow the rendered buffer, so a failed write leaves the image in
//! the caller's hands.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use penumbra_renderer::ImageBuffer;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Output container, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> SinkResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "ppm" => Ok(Self::Ppm),
            "png" => Ok(Self::Png),
            _ => Err(SinkError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Write `image` as binary PPM (`P6`).
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> SinkResult<()> {
    image.write_ppm(writer)?;
    Ok(())
}

/// Save `image` to `path`, in the format its extension names.
pub fn save_image(path: &Path, image: &ImageBuffer) -> SinkResult<()> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Ppm => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(&mut writer, image)
        }
        ImageFormat::Png => {
            image::save_buffer(
                path,
                &image.to_rgb8(),
                image.width,
                image.height,
                image::ColorType::Rgb8,
            )?;
            Ok(())
        }
    }
}
