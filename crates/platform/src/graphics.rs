//! [`Surface`] over an embedded-graphics `DrawTarget`
//!
//! Any RGB565 draw target (an SPI panel driver, the simulator framebuffer,
//! a test canvas) becomes a shell surface by wrapping it in
//! [`GraphicsSurface`]. Text uses the built-in ASCII mono fonts.

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_7X13},
        MonoFont, MonoTextStyle, MonoTextStyleBuilder,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment},
    text::{renderer::TextRenderer as _, Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::display::{Font, Surface, TextAlign, TextColors, TextMetrics};

/// Mono font used for each [`Font`] size.
pub fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Small => &FONT_6X10,
        Font::Body => &FONT_7X13,
        Font::Large => &FONT_10X20,
    }
}

/// Text metrics for one embedded-graphics mono font.
#[derive(Clone, Copy)]
pub struct MonoMetrics {
    font: &'static MonoFont<'static>,
}

impl MonoMetrics {
    /// Metrics for the mono font backing `font`.
    pub fn new(font: Font) -> Self {
        Self {
            font: mono_font(font),
        }
    }
}

impl TextMetrics for MonoMetrics {
    fn text_width(&self, text: &str) -> u32 {
        let style = MonoTextStyle::new(self.font, Rgb565::WHITE);
        let measured = style.measure_string(text, Point::zero(), Baseline::Top);
        u32::try_from(measured.next_position.x).unwrap_or(0)
    }
}

/// Shell surface backed by an RGB565 draw target.
pub struct GraphicsSurface<D> {
    target: D,
}

impl<D> GraphicsSurface<D> {
    /// Wrap a draw target.
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// Borrow the wrapped target.
    pub fn inner(&self) -> &D {
        &self.target
    }

    /// Mutably borrow the wrapped target.
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap the draw target.
    pub fn into_inner(self) -> D {
        self.target
    }
}

fn outline(color: Rgb565) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;
    type Metrics = MonoMetrics;

    fn size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.target.fill_solid(&area, color)
    }

    fn stroke_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        area.into_styled(outline(color)).draw(&mut self.target)
    }

    fn fill_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn stroke_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(outline(color))
            .draw(&mut self.target)
    }

    fn push_image(&mut self, area: Rectangle, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        self.target.fill_contiguous(&area, pixels.iter().copied())
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        font: Font,
        colors: TextColors,
    ) -> Result<(), Self::Error> {
        let mut character_style = MonoTextStyleBuilder::new()
            .font(mono_font(font))
            .text_color(colors.fg);
        if let Some(bg) = colors.bg {
            character_style = character_style.background_color(bg);
        }

        let (alignment, baseline) = match align {
            TextAlign::TopLeft => (Alignment::Left, Baseline::Top),
            TextAlign::TopCenter => (Alignment::Center, Baseline::Top),
            TextAlign::MiddleCenter => (Alignment::Center, Baseline::Middle),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        Text::with_text_style(text, anchor, character_style.build(), text_style)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn metrics(&self, font: Font) -> Self::Metrics {
        MonoMetrics::new(font)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    /// Minimal RGB565 canvas for exercising the adapter.
    struct Canvas {
        size: Size,
        pixels: Vec<Rgb565>,
    }

    impl Canvas {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                pixels: vec![Rgb565::BLACK; (width * height) as usize],
            }
        }

        fn at(&self, x: u32, y: u32) -> Rgb565 {
            self.pixels[(y * self.size.width + x) as usize]
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0
                    && point.y >= 0
                    && (point.x as u32) < self.size.width
                    && (point.y as u32) < self.size.height
                {
                    let index = (point.y as u32 * self.size.width + point.x as u32) as usize;
                    self.pixels[index] = color;
                }
            }
            Ok(())
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            self.size
        }
    }

    #[test]
    fn test_size_matches_target() {
        let surface = GraphicsSurface::new(Canvas::new(32, 16));
        assert_eq!(surface.size(), Size::new(32, 16));
        assert_eq!(surface.bounds(), Rectangle::new(Point::zero(), Size::new(32, 16)));
    }

    #[test]
    fn test_fill_rect_paints_area_only() {
        let mut surface = GraphicsSurface::new(Canvas::new(32, 16));
        let area = Rectangle::new(Point::new(2, 3), Size::new(4, 2));
        surface.fill_rect(area, Rgb565::RED).unwrap();

        let canvas = surface.inner();
        assert_eq!(canvas.at(2, 3), Rgb565::RED);
        assert_eq!(canvas.at(5, 4), Rgb565::RED);
        assert_eq!(canvas.at(6, 4), Rgb565::BLACK);
        assert_eq!(canvas.at(2, 5), Rgb565::BLACK);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut surface = GraphicsSurface::new(Canvas::new(32, 16));
        let area = Rectangle::new(Point::new(1, 1), Size::new(6, 6));
        surface.stroke_rect(area, Rgb565::GREEN).unwrap();

        let canvas = surface.inner();
        assert_eq!(canvas.at(1, 1), Rgb565::GREEN);
        assert_eq!(canvas.at(6, 6), Rgb565::GREEN);
        assert_eq!(canvas.at(3, 3), Rgb565::BLACK);
    }

    #[test]
    fn test_push_image_row_major() {
        let mut surface = GraphicsSurface::new(Canvas::new(8, 8));
        let area = Rectangle::new(Point::new(1, 1), Size::new(2, 2));
        let block = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];
        surface.push_image(area, &block).unwrap();

        let canvas = surface.into_inner();
        assert_eq!(canvas.at(1, 1), Rgb565::RED);
        assert_eq!(canvas.at(2, 1), Rgb565::GREEN);
        assert_eq!(canvas.at(1, 2), Rgb565::BLUE);
        assert_eq!(canvas.at(2, 2), Rgb565::WHITE);
    }

    #[test]
    fn test_text_width_is_cell_multiple() {
        let surface = GraphicsSurface::new(Canvas::new(8, 8));
        for font in [Font::Small, Font::Body, Font::Large] {
            assert_eq!(surface.text_width("", font), 0);
            assert_eq!(surface.text_width("abcd", font), 4 * font.cell().width);
        }
    }

    #[test]
    fn test_opaque_text_paints_background() {
        let mut surface = GraphicsSurface::new(Canvas::new(32, 16));
        let colors = TextColors::on(Rgb565::BLACK, Rgb565::YELLOW);
        surface
            .draw_text(" ", Point::zero(), TextAlign::TopLeft, Font::Small, colors)
            .unwrap();
        assert_eq!(surface.inner().at(0, 0), Rgb565::YELLOW);
    }
}
