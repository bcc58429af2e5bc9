//! Desktop wallpaper
//!
//! The desktop background is a fixed-size RGB565 pixel map. The scene reads
//! rows of it back into a scratch buffer when it restores the background
//! under a dirty rectangle.

use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
};
use thiserror_no_std::Error;

/// Read access to a background pixel map.
pub trait Wallpaper {
    /// Pixel map dimensions.
    fn size(&self) -> Size;

    /// Pixel at `point`, or black outside the map.
    fn pixel(&self, point: Point) -> Rgb565;

    /// Copy `out.len()` pixels of one row, starting at `start`.
    ///
    /// Pixels past the map edge read as black.
    fn read_row(&self, start: Point, out: &mut [Rgb565]) {
        let mut point = start;
        for px in out.iter_mut() {
            *px = self.pixel(point);
            point.x = point.x.saturating_add(1);
        }
    }
}

/// Wallpaper construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WallpaperError {
    /// Pixel data length does not match the declared dimensions
    #[error("wallpaper data holds {actual} pixels, {expected} expected")]
    SizeMismatch {
        /// width × height
        expected: usize,
        /// `data.len()`
        actual: usize,
    },
}

/// Wallpaper over a raw RGB565 asset (e.g. an `include_bytes!`-converted
/// array), row-major.
#[derive(Debug, Clone, Copy)]
pub struct RawWallpaper<'a> {
    size: Size,
    data: &'a [u16],
    swap_bytes: bool,
}

impl<'a> RawWallpaper<'a> {
    /// Wrap `data` as a `width × height` pixel map.
    pub fn new(width: u32, height: u32, data: &'a [u16]) -> Result<Self, WallpaperError> {
        let expected = (width as usize).saturating_mul(height as usize);
        if data.len() != expected {
            return Err(WallpaperError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            size: Size::new(width, height),
            data,
            swap_bytes: false,
        })
    }

    /// Treat the asset as big-endian words (panel byte order).
    #[must_use]
    pub fn with_swapped_bytes(mut self) -> Self {
        self.swap_bytes = true;
        self
    }
}

impl Wallpaper for RawWallpaper<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn pixel(&self, point: Point) -> Rgb565 {
        let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
            return Rgb565::BLACK;
        };
        let width = self.size.width as usize;
        if x >= width || y >= self.size.height as usize {
            return Rgb565::BLACK;
        }
        let raw = y
            .checked_mul(width)
            .and_then(|row| row.checked_add(x))
            .and_then(|index| self.data.get(index))
            .copied()
            .unwrap_or(0);
        let raw = if self.swap_bytes { raw.swap_bytes() } else { raw };
        Rgb565::from(RawU16::new(raw))
    }
}

/// Single-colour wallpaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidWallpaper {
    size: Size,
    color: Rgb565,
}

impl SolidWallpaper {
    /// A `size` map filled with `color`.
    pub const fn new(size: Size, color: Rgb565) -> Self {
        Self { size, color }
    }
}

impl Wallpaper for SolidWallpaper {
    fn size(&self) -> Size {
        self.size
    }

    fn pixel(&self, point: Point) -> Rgb565 {
        let inside = point.x >= 0
            && point.y >= 0
            && u32::try_from(point.x).is_ok_and(|x| x < self.size.width)
            && u32::try_from(point.y).is_ok_and(|y| y < self.size.height);
        if inside {
            self.color
        } else {
            Rgb565::BLACK
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    const CHECKER: [u16; 6] = [0xF800, 0x07E0, 0x001F, 0xFFFF, 0x0000, 0xF800];

    #[test]
    fn test_raw_rejects_wrong_length() {
        let err = RawWallpaper::new(4, 2, &CHECKER).unwrap_err();
        assert_eq!(
            err,
            WallpaperError::SizeMismatch {
                expected: 8,
                actual: 6
            }
        );
    }

    #[test]
    fn test_raw_pixel_lookup() {
        let wallpaper = RawWallpaper::new(3, 2, &CHECKER).unwrap();
        assert_eq!(wallpaper.size(), Size::new(3, 2));
        assert_eq!(wallpaper.pixel(Point::new(0, 0)), Rgb565::RED);
        assert_eq!(wallpaper.pixel(Point::new(1, 0)), Rgb565::GREEN);
        assert_eq!(wallpaper.pixel(Point::new(0, 1)), Rgb565::WHITE);
    }

    #[test]
    fn test_raw_out_of_range_is_black() {
        let wallpaper = RawWallpaper::new(3, 2, &CHECKER).unwrap();
        assert_eq!(wallpaper.pixel(Point::new(-1, 0)), Rgb565::BLACK);
        assert_eq!(wallpaper.pixel(Point::new(3, 0)), Rgb565::BLACK);
        assert_eq!(wallpaper.pixel(Point::new(0, 2)), Rgb565::BLACK);
    }

    #[test]
    fn test_swapped_bytes() {
        let data = [0x00F8u16];
        let wallpaper = RawWallpaper::new(1, 1, &data).unwrap().with_swapped_bytes();
        assert_eq!(wallpaper.pixel(Point::zero()), Rgb565::RED);
    }

    #[test]
    fn test_read_row_pads_with_black() {
        let wallpaper = RawWallpaper::new(3, 2, &CHECKER).unwrap();
        let mut row = [Rgb565::YELLOW; 4];
        wallpaper.read_row(Point::new(1, 1), &mut row);
        assert_eq!(row, [Rgb565::BLACK, Rgb565::RED, Rgb565::BLACK, Rgb565::BLACK]);
    }

    #[test]
    fn test_solid_wallpaper() {
        let wallpaper = SolidWallpaper::new(Size::new(10, 10), Rgb565::BLUE);
        assert_eq!(wallpaper.pixel(Point::new(9, 9)), Rgb565::BLUE);
        assert_eq!(wallpaper.pixel(Point::new(10, 0)), Rgb565::BLACK);
    }
}
