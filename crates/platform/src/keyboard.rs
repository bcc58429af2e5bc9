//! On-screen keyboard widget seam
//!
//! The keyboard's key layout and glyphs are owned by the widget. The chat
//! view only forwards touches that land inside the keyboard, reads the
//! composed text, and asks where the keyboard's top edge is so it can lay
//! the input bar out above it.

use embedded_graphics::prelude::Point;

use crate::display::Surface;

/// Outcome of forwarding one touch to the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardEvent {
    /// Nothing the host needs to do
    Unchanged,
    /// Composed text changed; the host repaints its input field
    TextChanged,
    /// Keyboard needs to be redrawn (e.g. shift/page switch)
    RequestRedraw,
    /// Hide key pressed; the host hides the keyboard and relayouts
    RequestHide,
}

/// On-screen keyboard.
pub trait Keyboard {
    /// Text composed so far.
    fn text(&self) -> &str;

    /// Discard the composed text.
    fn clear(&mut self);

    /// Show or hide the widget.
    fn set_visible(&mut self, visible: bool);

    /// Feed one touch sample inside the keyboard extent.
    ///
    /// `pressed` is false for the release that ends a keyboard touch.
    fn handle_touch(&mut self, pressed: bool, point: Point) -> KeyboardEvent;

    /// Paint the widget.
    fn draw<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error>;

    /// Y coordinate of the widget's top edge when visible.
    fn top(&self) -> i32;
}
