//! Shell colours.
//!
//! Presentation only; nothing in the interaction logic depends on them.

use embedded_graphics::pixelcolor::Rgb565;

/// Colour from a packed 5-6-5 word.
pub const fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::new(
        ((raw >> 11) & 0x1F) as u8,
        ((raw >> 5) & 0x3F) as u8,
        (raw & 0x1F) as u8,
    )
}

/// Colours used by the desktop and the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen fill behind the wallpaper
    pub background: Rgb565,
    /// Unselected label text
    pub label_text: Rgb565,
    /// Unselected label drop shadow
    pub label_shadow: Rgb565,
    /// Selection block, upper half
    pub highlight_top: Rgb565,
    /// Selection block, lower half
    pub highlight_bottom: Rgb565,
    /// Selection block border and text
    pub highlight_edge: Rgb565,
    /// Menu face
    pub menu_face: Rgb565,
    /// Menu light bevel
    pub menu_light: Rgb565,
    /// Menu dark bevel
    pub menu_dark: Rgb565,
    /// Menu inner frame
    pub menu_shade: Rgb565,
    /// Menu text
    pub menu_text: Rgb565,
    /// Chat header bar
    pub chat_header: Rgb565,
    /// Chat history background
    pub chat_background: Rgb565,
    /// Chat history text
    pub chat_text: Rgb565,
    /// Chat input field and button outlines
    pub chat_outline: Rgb565,
    /// SEND button face
    pub chat_send: Rgb565,
    /// HIDE/SHOW and BACK button face
    pub chat_button: Rgb565,
    /// Icon tile outline
    pub icon_outline: Rgb565,
    /// Icon glyph text
    pub icon_glyph: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb565(0x0000),
            label_text: rgb565(0xFFFF),
            label_shadow: rgb565(0x0000),
            highlight_top: rgb565(0x1C9F),
            highlight_bottom: rgb565(0x047F),
            highlight_edge: rgb565(0xFFFF),
            menu_face: rgb565(0xEF7D),
            menu_light: rgb565(0xFFFF),
            menu_dark: rgb565(0x7BEF),
            menu_shade: rgb565(0xC618),
            menu_text: rgb565(0x0000),
            chat_header: rgb565(0x001F),
            chat_background: rgb565(0xFFFF),
            chat_text: rgb565(0x0000),
            chat_outline: rgb565(0x0000),
            chat_send: rgb565(0x07E0),
            chat_button: rgb565(0xD69A),
            icon_outline: rgb565(0xFFFF),
            icon_glyph: rgb565(0xFFFF),
        }
    }
}
