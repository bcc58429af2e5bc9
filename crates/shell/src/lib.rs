//! TouchDesk shell core
//!
//! The interactive part of the device: an icon desktop with draggable items
//! and a context menu, and an AI chat screen with a word-wrapped, scrollable
//! history. Everything is driven by one touch sample per polling tick and
//! repaints only what changed.
//!
//! # Layers
//!
//! ```text
//! Shell (router)          ← navigation stack, screen switching
//!   ├─ Desktop            ← gesture classifier + context menu
//!   │    └─ Scene         ← items, dirty-rect redraw, wallpaper restore
//!   └─ ChatView           ← history, wrap engine, line scroll, keyboard layout
//! ```
//!
//! All drawing goes through [`platform::Surface`]; rendering errors are the
//! surface's own error type and are propagated with `?`.
//!
//! # Example
//!
//! ```
//! use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
//! use platform::{mocks::RecordingSurface, SolidWallpaper, TouchSample};
//! use shell::{Desktop, DesktopAction, App, ShellConfig};
//!
//! let mut surface = RecordingSurface::new(Size::new(320, 240));
//! let wallpaper = SolidWallpaper::new(Size::new(320, 240), Rgb565::BLACK);
//! let mut desktop = Desktop::new(&ShellConfig::default());
//! desktop.draw(&mut surface, &wallpaper).unwrap();
//!
//! let p = Point::new(30, 50);
//! desktop.handle_touch(TouchSample::new(true, false, p, 0), &mut surface, &wallpaper).unwrap();
//! let action = desktop
//!     .handle_touch(TouchSample::new(false, true, p, 80), &mut surface, &wallpaper)
//!     .unwrap();
//! assert_eq!(action, Some(DesktopAction::Open(App::Chat)));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod chat;
pub mod config;
pub mod desktop;
pub mod geometry;
pub mod gesture;
pub mod items;
pub mod menu;
pub mod navigation;
pub mod palette;
pub mod router;
pub mod scene;
pub mod scroll;
pub mod wrap;

pub use chat::{ChatEvent, ChatHistory, ChatMessage, ChatView};
pub use config::ShellConfig;
pub use desktop::{Desktop, DesktopAction};
pub use gesture::{Gesture, GestureClassifier, GestureInput, Hit};
pub use items::App;
pub use menu::{ContextMenu, MenuCommand, MenuRow};
pub use navigation::{Navigator, Screen};
pub use palette::Palette;
pub use router::{Devices, Shell};
pub use scene::Scene;
pub use scroll::ScrollState;
pub use wrap::{line_count, wrap, WrappedLine, WrappedLines};
