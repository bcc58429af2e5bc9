//! In-memory RGB565 panel
//!
//! Stands in for the SPI display: the shell draws into it through
//! `GraphicsSurface`, and the final frame can be written out as a PNG.

use std::{convert::Infallible, path::Path};

use anyhow::{Context, Result};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use image::{Rgb, RgbImage};

pub struct Framebuffer {
    size: Size,
    pixels: Vec<Rgb565>,
    writes: u64,
}

impl Framebuffer {
    pub fn new(size: Size) -> Self {
        let len = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![Rgb565::BLACK; len],
            writes: 0,
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).and_then(|i| self.pixels.get(i).copied())
    }

    /// Pixels written since creation.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = RgbImage::from_fn(self.size.width, self.size.height, |x, y| {
            let i = y as usize * self.size.width as usize + x as usize;
            Rgb(to_rgb888(self.pixels.get(i).copied().unwrap_or(Rgb565::BLACK)))
        });
        img.save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Expand 5/6/5 channels to 8 bits, replicating the high bits.
fn to_rgb888(color: Rgb565) -> [u8; 3] {
    let (r, g, b) = (color.r(), color.g(), color.b());
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = self.index(point).and_then(|i| self.pixels.get_mut(i)) {
                *slot = color;
                self.writes += 1;
            }
        }
        Ok(())
    }
}
