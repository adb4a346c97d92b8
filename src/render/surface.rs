use std::path::Path;

use anyhow::Context;

use crate::{
    assets::Frame,
    foundation::{core::PixelSize, error::ScrollSeqResult},
};

/// Drawable target that replaces the original image.
///
/// Only the render scheduler and the mount step draw into a surface, so implementations need
/// no internal synchronization.
pub trait RenderSurface {
    /// Current pixel size, `None` before the surface has been sized.
    fn size(&self) -> Option<PixelSize>;

    /// Set the pixel size; contents become transparent.
    fn resize(&mut self, size: PixelSize);

    /// Clear every pixel to transparent.
    fn clear(&mut self);

    /// Draw `frame` over the whole surface, scaling it when sizes differ.
    fn draw_frame(&mut self, frame: &Frame);
}

/// CPU raster surface holding premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    pixels: image::RgbaImage,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self {
            pixels: image::RgbaImage::new(0, 0),
        }
    }
}

impl RasterSurface {
    /// A transparent surface of `size`.
    pub fn new(size: PixelSize) -> Self {
        Self {
            pixels: image::RgbaImage::new(size.width, size.height),
        }
    }

    /// Premultiplied pixel buffer.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }

    /// Write the surface as a straight-alpha PNG.
    pub fn save_png(&self, path: &Path) -> ScrollSeqResult<()> {
        let mut straight = self.pixels.clone();
        for px in straight.pixels_mut() {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in 0..3 {
                px[c] = ((u16::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        straight
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl RenderSurface for RasterSurface {
    fn size(&self) -> Option<PixelSize> {
        let (width, height) = self.pixels.dimensions();
        PixelSize::new(width, height).ok()
    }

    fn resize(&mut self, size: PixelSize) {
        self.pixels = image::RgbaImage::new(size.width, size.height);
    }

    fn clear(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = image::Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_frame(&mut self, frame: &Frame) {
        let Some(src) =
            image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba8_premul.to_vec())
        else {
            tracing::warn!(
                width = frame.width,
                height = frame.height,
                len = frame.rgba8_premul.len(),
                "frame buffer does not match its dimensions; skipping draw"
            );
            return;
        };

        let (w, h) = self.pixels.dimensions();
        let src = if src.dimensions() == (w, h) {
            src
        } else {
            image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle)
        };

        for (dst, s) in self.pixels.pixels_mut().zip(src.pixels()) {
            let inv = 255 - u16::from(s[3]);
            for c in 0..4 {
                dst[c] = (u16::from(s[c]) + mul_div255(u16::from(dst[c]), inv)).min(255) as u8;
            }
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
