//! Shell configuration
//!
//! Thresholds and layout metrics for the desktop and chat screens. Every
//! struct's `Default` reproduces the 320×240 reference device.

use embedded_graphics::prelude::Size;
use platform::config::PANEL_SIZE;

/// Pixels in the wallpaper scratch buffer (200×80).
///
/// Dirty regions larger than this fall back to a full wallpaper repaint.
pub const SCRATCH_PIXELS: usize = 200 * 80;

/// Chat messages kept in history before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 12;

/// Per-message buffer size; stored text is one byte shorter.
pub const MESSAGE_BUFFER_LEN: usize = 400;

/// Maximum stored bytes per message side.
pub const MESSAGE_MAX_BYTES: usize = MESSAGE_BUFFER_LEN - 1;

/// Soft cap on lines produced by one wrap of a paragraph.
pub const MAX_WRAPPED_LINES: usize = 200;

/// Capacity of one wrapped line; a whole prefixed paragraph fits.
pub const WRAP_LINE_BYTES: usize = MESSAGE_MAX_BYTES + 8;

/// Touch gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Displacement on either axis that turns a press into a drag (strictly greater)
    pub drag_threshold_px: u32,
    /// Hold time after which a press counts as a long press
    pub hold_ms: u64,
    /// Window in which a second tap on the same item is a double tap
    pub double_tap_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 10,
            hold_ms: 380,
            double_tap_ms: 450,
        }
    }
}

/// Icon label slot geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMetrics {
    /// Slot width, centred under the icon
    pub width: u32,
    /// Slot height
    pub height: u32,
    /// Gap between icon bottom and slot top
    pub gap: u32,
    /// Padding added around icon+slot for the item bounding box
    pub pad: u32,
    /// Minimum width of the selection highlight block
    pub min_block_width: u32,
    /// Horizontal text padding inside the highlight block
    pub block_text_pad: u32,
    /// Height of the highlight block
    pub block_height: u32,
    /// Distance the block keeps from the screen edges
    pub edge_margin: u32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            width: 96,
            height: 22,
            gap: 4,
            pad: 2,
            min_block_width: 34,
            block_text_pad: 14,
            block_height: 18,
            edge_margin: 2,
        }
    }
}

/// Context menu geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuMetrics {
    /// Popup width
    pub width: u32,
    /// Height of one row
    pub row_height: u32,
    /// Bevel inset around the rows
    pub inset: u32,
    /// Text indent inside a row
    pub text_indent: u32,
    /// Margin kept from the right/bottom screen edges when clamping
    pub edge_margin: u32,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            width: 150,
            row_height: 20,
            inset: 3,
            text_indent: 9,
            edge_margin: 2,
        }
    }
}

/// Chat screen layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    /// Header bar height
    pub header_height: u32,
    /// Top of the history area
    pub chat_top: i32,
    /// Offset from `chat_top` to the first text row
    pub first_line_offset: i32,
    /// Left text margin
    pub text_x0: i32,
    /// Right text margin
    pub text_x1: i32,
    /// Logical line height (the scroll unit)
    pub line_height: u32,
    /// Input field left edge
    pub input_x: i32,
    /// Input field width
    pub input_width: u32,
    /// Input bar height
    pub input_height: u32,
    /// Vertical gap between the bars and neighbouring regions
    pub gap: i32,
    /// Left edge of the input text
    pub input_text_x: i32,
    /// Visible width of the input text (tail kept)
    pub input_text_width: u32,
    /// Left edge of the SEND and HIDE/SHOW buttons
    pub button_x: i32,
    /// Width of the SEND and HIDE/SHOW buttons
    pub button_width: u32,
    /// Height of the HIDE/SHOW toggle
    pub toggle_height: u32,
    /// Distance from the toggle's top to the input bar's top
    pub toggle_lift: i32,
    /// BACK button left edge
    pub back_x: i32,
    /// BACK button top edge
    pub back_y: i32,
    /// BACK button size
    pub back_size: Size,
}

impl ChatLayout {
    /// Usable text width of the history area.
    pub fn text_width(&self) -> u32 {
        u32::try_from(self.text_x1.saturating_sub(self.text_x0)).unwrap_or(0)
    }
}

impl Default for ChatLayout {
    fn default() -> Self {
        Self {
            header_height: 28,
            chat_top: 32,
            first_line_offset: 8,
            text_x0: 8,
            text_x1: 316,
            line_height: 16,
            input_x: 4,
            input_width: 240,
            input_height: 28,
            gap: 6,
            input_text_x: 22,
            input_text_width: 210,
            button_x: 250,
            button_width: 66,
            toggle_height: 20,
            toggle_lift: 24,
            back_x: 260,
            back_y: 6,
            back_size: Size::new(52, 17),
        }
    }
}

/// Everything the shell needs to lay itself out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Screen dimensions
    pub screen: Size,
    /// Gesture thresholds
    pub gesture: GestureConfig,
    /// Icon label geometry
    pub label: LabelMetrics,
    /// Context menu geometry
    pub menu: MenuMetrics,
    /// Chat layout
    pub chat: ChatLayout,
}

impl ShellConfig {
    /// Reference layout scaled to a different panel size.
    ///
    /// Only the screen bounds change; item home positions and chat metrics
    /// stay those of the reference device.
    pub fn with_screen(screen: Size) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            screen: PANEL_SIZE,
            gesture: GestureConfig::default(),
            label: LabelMetrics::default(),
            menu: MenuMetrics::default(),
            chat: ChatLayout::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_defaults() {
        let g = GestureConfig::default();
        assert_eq!(g.drag_threshold_px, 10);
        assert_eq!(g.hold_ms, 380);
        assert_eq!(g.double_tap_ms, 450);
    }

    #[test]
    fn test_message_bytes() {
        assert_eq!(MESSAGE_MAX_BYTES, 399);
        assert_eq!(SCRATCH_PIXELS, 16_000);
    }

    #[test]
    fn test_chat_text_width() {
        assert_eq!(ChatLayout::default().text_width(), 308);
    }

    #[test]
    fn test_with_screen_keeps_metrics() {
        let c = ShellConfig::with_screen(Size::new(480, 320));
        assert_eq!(c.screen, Size::new(480, 320));
        assert_eq!(c.menu, MenuMetrics::default());
    }
}
