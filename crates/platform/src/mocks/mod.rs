//! Mock implementations for testing
//!
//! Host-side doubles for every platform seam, used by unit tests, the
//! shell's integration tests and the simulator.

#![cfg(any(test, feature = "std"))]

use std::{collections::VecDeque, string::String, vec::Vec};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::{
    assistant::reply_from, AiBackend, BackendError, Font, Keyboard, KeyboardEvent, Reply, Surface,
    TextAlign, TextColors, TextMetrics,
};

/// Keyboard top edge used by [`ScriptedKeyboard::default`]
pub const DEFAULT_KEYBOARD_TOP: i32 = 152;

/// Colour painted over the keyboard extent by [`ScriptedKeyboard::draw`]
pub const KEYBOARD_FILL: Rgb565 = Rgb565::new(10, 21, 10);

/// Fixed-advance text metrics matching the nominal [`Font::cell`] widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics {
    advance: u32,
}

impl FixedMetrics {
    /// Metrics for `font`'s nominal cell width.
    pub const fn new(font: Font) -> Self {
        Self {
            advance: font.cell().width,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn text_width(&self, text: &str) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(self.advance)
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    /// `fill_rect`
    Fill {
        /// Filled area
        area: Rectangle,
        /// Fill colour
        color: Rgb565,
    },
    /// `stroke_rect`
    Stroke {
        /// Outlined area
        area: Rectangle,
        /// Stroke colour
        color: Rgb565,
    },
    /// `fill_round_rect`
    FillRound {
        /// Filled area
        area: Rectangle,
        /// Corner radius
        radius: u32,
        /// Fill colour
        color: Rgb565,
    },
    /// `stroke_round_rect`
    StrokeRound {
        /// Outlined area
        area: Rectangle,
        /// Corner radius
        radius: u32,
        /// Stroke colour
        color: Rgb565,
    },
    /// `push_image`
    Image {
        /// Destination area
        area: Rectangle,
        /// Number of pixels supplied
        pixels: usize,
    },
    /// `draw_text`
    Text {
        /// Drawn string
        text: String,
        /// Anchor point
        anchor: Point,
        /// Anchor alignment
        align: TextAlign,
        /// Font size
        font: Font,
        /// Colours
        colors: TextColors,
    },
}

/// Surface that records every primitive instead of rasterising.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// New recorder with the given dimensions.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// All calls so far, oldest first.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Destination areas of every `push_image` call.
    pub fn image_areas(&self) -> Vec<Rectangle> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Image { area, .. } => Some(*area),
                _ => None,
            })
            .collect()
    }

    /// Every drawn string, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls.
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }
}

impl Surface for RecordingSurface {
    type Error = core::convert::Infallible;
    type Metrics = FixedMetrics;

    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Fill { area, color });
        Ok(())
    }

    fn stroke_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Stroke { area, color });
        Ok(())
    }

    fn fill_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::FillRound {
            area,
            radius,
            color,
        });
        Ok(())
    }

    fn stroke_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::StrokeRound {
            area,
            radius,
            color,
        });
        Ok(())
    }

    fn push_image(&mut self, area: Rectangle, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Image {
            area,
            pixels: pixels.len(),
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        font: Font,
        colors: TextColors,
    ) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Text {
            text: String::from(text),
            anchor,
            align,
            font,
            colors,
        });
        Ok(())
    }

    fn metrics(&self, font: Font) -> Self::Metrics {
        FixedMetrics::new(font)
    }
}

/// Keyboard whose responses are queued up front.
#[derive(Debug, Clone)]
pub struct ScriptedKeyboard {
    text: String,
    visible: bool,
    top: i32,
    events: VecDeque<KeyboardEvent>,
    touches: Vec<(bool, Point)>,
    draws: usize,
    clears: usize,
}

impl ScriptedKeyboard {
    /// Visible keyboard with its top edge at `top`.
    pub fn new(top: i32) -> Self {
        Self {
            text: String::new(),
            visible: true,
            top,
            events: VecDeque::new(),
            touches: Vec::new(),
            draws: 0,
            clears: 0,
        }
    }

    /// Replace the composed text.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Queue the response to the next forwarded touch.
    pub fn queue(&mut self, event: KeyboardEvent) {
        self.events.push_back(event);
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Touches forwarded so far.
    pub fn touches(&self) -> &[(bool, Point)] {
        &self.touches
    }

    /// Number of `draw` calls.
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    /// Number of `clear` calls.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Default for ScriptedKeyboard {
    fn default() -> Self {
        Self::new(DEFAULT_KEYBOARD_TOP)
    }
}

impl Keyboard for ScriptedKeyboard {
    fn text(&self) -> &str {
        &self.text
    }

    fn clear(&mut self) {
        self.text.clear();
        self.clears = self.clears.saturating_add(1);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn handle_touch(&mut self, pressed: bool, point: Point) -> KeyboardEvent {
        self.touches.push((pressed, point));
        self.events.pop_front().unwrap_or(KeyboardEvent::Unchanged)
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.draws = self.draws.saturating_add(1);
        let size = surface.size();
        let top = u32::try_from(self.top).unwrap_or(0).min(size.height);
        let area = Rectangle::new(
            Point::new(0, self.top),
            Size::new(size.width, size.height.saturating_sub(top)),
        );
        surface.fill_rect(area, KEYBOARD_FILL)
    }

    fn top(&self) -> i32 {
        self.top
    }
}

/// Backend answering from a queue of canned replies.
///
/// With the queue empty every message is answered with `"ok"`.
#[derive(Debug, Clone, Default)]
pub struct CannedBackend {
    replies: VecDeque<Result<Reply, BackendError>>,
    sent: Vec<String>,
}

impl CannedBackend {
    /// Backend with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn push_reply(&mut self, text: &str) {
        self.replies.push_back(Ok(reply_from(text)));
    }

    /// Queue a failure.
    pub fn push_error(&mut self, error: BackendError) {
        self.replies.push_back(Err(error));
    }

    /// Messages received so far.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
}

impl AiBackend for CannedBackend {
    fn send_message(&mut self, text: &str) -> Result<Reply, BackendError> {
        self.sent.push(String::from(text));
        self.replies
            .pop_front()
            .unwrap_or_else(|| Ok(reply_from("ok")))
    }
}
