//! PNG output for rendered canvases.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, SproutError};

use super::canvas::Canvas;

/// Write a canvas to a PNG file with optional integer upscaling.
pub fn write_png(canvas: &Canvas, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);

    let width = canvas.pixel_width() as u32 * scale;
    let height = canvas.pixel_height() as u32 * scale;

    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for y in 0..canvas.pixel_height() {
        for x in 0..canvas.pixel_width() {
            let colour = canvas.get(x, y).unwrap_or_default();
            let rgba = Rgba(colour.to_rgba());

            for sy in 0..scale {
                for sx in 0..scale {
                    img.put_pixel(x as u32 * scale + sx, y as u32 * scale + sy, rgba);
                }
            }
        }
    }

    img.save(path).map_err(|e| SproutError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
