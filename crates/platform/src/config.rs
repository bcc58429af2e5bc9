//! Application configuration and constants
//!
//! Central values shared by the shell and the simulator. Branding and the
//! reference panel geometry should reference these constants rather than
//! hardcoding values.

use embedded_graphics::prelude::Size;

/// The application name
pub const APP_NAME: &str = "TouchDesk";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference panel width in pixels (landscape)
pub const PANEL_WIDTH: u32 = 320;

/// Reference panel height in pixels (landscape)
pub const PANEL_HEIGHT: u32 = 240;

/// Reference panel size
pub const PANEL_SIZE: Size = Size::new(PANEL_WIDTH, PANEL_HEIGHT);

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "TouchDesk - Development Mode"
}
