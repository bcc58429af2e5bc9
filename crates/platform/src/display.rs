//! Rendering surface abstraction
//!
//! The shell draws through [`Surface`]: a handful of filled/stroked shapes,
//! raw image pushes (wallpaper restore) and text. Every call returns the
//! surface's own error type so failures propagate with `?`, following the
//! `DrawTarget` convention.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

/// Text anchor alignment.
///
/// The anchor point passed to [`Surface::draw_text`] is interpreted relative
/// to the text's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    /// Anchor is the top-left corner of the text box
    TopLeft,
    /// Anchor is the middle of the top edge
    TopCenter,
    /// Anchor is the centre of the text box
    MiddleCenter,
}

/// Font selection.
///
/// Three sizes cover every label in the shell. Sizes are nominal; the
/// concrete glyph set is chosen by the surface implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Small UI text (labels, buttons)
    Small,
    /// Body text (chat history, menu rows, input field)
    Body,
    /// Large headings and icon badges
    Large,
}

impl Font {
    /// Nominal glyph cell size (width, height) in pixels.
    pub const fn cell(self) -> Size {
        match self {
            Font::Small => Size::new(6, 10),
            Font::Body => Size::new(7, 13),
            Font::Large => Size::new(10, 20),
        }
    }
}

/// Foreground and optional background colour for text.
///
/// Without a background the glyphs are drawn transparently over whatever
/// is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    /// Glyph colour
    pub fg: Rgb565,
    /// Fill behind glyphs, `None` for transparent text
    pub bg: Option<Rgb565>,
}

impl TextColors {
    /// Transparent text in `fg`.
    pub const fn new(fg: Rgb565) -> Self {
        Self { fg, bg: None }
    }

    /// Opaque text in `fg` over `bg`.
    pub const fn on(fg: Rgb565, bg: Rgb565) -> Self {
        Self { fg, bg: Some(bg) }
    }
}

/// Measures rendered text width.
///
/// Metrics are handed out by value (see [`Surface::metrics`]) so text can be
/// measured while the surface itself is mutably borrowed for drawing.
pub trait TextMetrics {
    /// Width in pixels of `text` rendered in one line.
    fn text_width(&self, text: &str) -> u32;
}

impl<M: TextMetrics + ?Sized> TextMetrics for &M {
    fn text_width(&self, text: &str) -> u32 {
        (**self).text_width(text)
    }
}

/// Drawing capability used by the shell.
///
/// Implementations clip to their own bounds; coordinates outside the
/// surface are never an error.
pub trait Surface {
    /// Error type for drawing operations
    type Error;

    /// Text measurement handle for one font
    type Metrics: TextMetrics + Copy;

    /// Surface dimensions in pixels.
    fn size(&self) -> Size;

    /// Fill `area` with a solid colour.
    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), Self::Error>;

    /// Draw a 1 px outline just inside `area`.
    fn stroke_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), Self::Error>;

    /// Fill a rounded rectangle with equal corner radii.
    fn fill_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Draw a 1 px rounded outline just inside `area`.
    fn stroke_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Copy a row-major pixel block into `area`.
    ///
    /// `pixels` holds `area.size.width * area.size.height` entries; a shorter
    /// slice leaves the remainder of the area untouched.
    fn push_image(&mut self, area: Rectangle, pixels: &[Rgb565]) -> Result<(), Self::Error>;

    /// Draw one line of text anchored at `anchor`.
    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        font: Font,
        colors: TextColors,
    ) -> Result<(), Self::Error>;

    /// Measurement handle for `font`.
    fn metrics(&self, font: Font) -> Self::Metrics;

    /// Width in pixels of `text` in `font`.
    fn text_width(&self, text: &str, font: Font) -> u32 {
        self.metrics(font).text_width(text)
    }

    /// Full-surface rectangle.
    fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size())
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    struct PerChar(u32);

    impl TextMetrics for PerChar {
        fn text_width(&self, text: &str) -> u32 {
            u32::try_from(text.chars().count()).unwrap_or(u32::MAX) * self.0
        }
    }

    #[test]
    fn test_font_cells_grow() {
        assert!(Font::Small.cell().width < Font::Body.cell().width);
        assert!(Font::Body.cell().width < Font::Large.cell().width);
    }

    #[test]
    fn test_text_colors_constructors() {
        let plain = TextColors::new(Rgb565::WHITE);
        assert_eq!(plain.bg, None);

        let opaque = TextColors::on(Rgb565::BLACK, Rgb565::WHITE);
        assert_eq!(opaque.fg, Rgb565::BLACK);
        assert_eq!(opaque.bg, Some(Rgb565::WHITE));
    }

    #[test]
    fn test_metrics_by_reference() {
        let metrics = PerChar(7);
        let by_ref = &metrics;
        assert_eq!(by_ref.text_width("abc"), 21);
        assert_eq!(metrics.text_width(""), 0);
    }
}
