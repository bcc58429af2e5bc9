//! Capability seams for the TouchDesk shell
//!
//! The shell core never talks to a panel, a touch controller or a network
//! stack directly. It is written against the small traits in this crate so
//! it can run on the device, in the host simulator, and under test.
//!
//! # Architecture Layers
//!
//! ```text
//! Board bring-up (display SPI, touch I2C, WiFi)
//!         ↓
//! Shell core (desktop, gestures, chat)    ← crates/shell
//!         ↓
//! Platform seams (this crate - traits + adapters)
//!         ↓
//! embedded-graphics DrawTarget / touch controller / AI transport
//! ```
//!
//! # Capabilities
//!
//! - [`Surface`] - filled/stroked rects, images, text and text metrics
//! - [`GraphicsSurface`] - [`Surface`] over any RGB565 `DrawTarget`
//! - [`Wallpaper`] - the background pixel map restored under dirty rects
//! - [`TouchInput`] / [`TouchTracker`] - polled touch panel to per-tick samples
//! - [`Keyboard`] - the on-screen keyboard widget
//! - [`AiBackend`] - the chat assistant transport
//!
//! # Features
//!
//! - `std`: host mocks in [`mocks`] (recording surface, scripted keyboard, …)
//! - `defmt`: `defmt::Format` derives for hardware logging
//!
//! # Example
//!
//! ```
//! use platform::{Font, Surface, TextAlign, TextColors};
//! use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
//!
//! fn banner<S: Surface>(surface: &mut S) -> Result<(), S::Error> {
//!     let colors = TextColors::new(Rgb565::WHITE);
//!     surface.draw_text("TouchDesk", Point::new(160, 4), TextAlign::TopCenter, Font::Body, colors)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod assistant;
pub mod config;
pub mod display;
pub mod graphics;
pub mod input;
pub mod keyboard;
pub mod wallpaper;

pub mod mocks;

pub use assistant::{AiBackend, BackendError, Reply, REPLY_CAPACITY};
pub use display::{Font, Surface, TextAlign, TextColors, TextMetrics};
pub use graphics::{GraphicsSurface, MonoMetrics};
pub use input::{TouchInput, TouchSample, TouchTracker};
pub use keyboard::{Keyboard, KeyboardEvent};
pub use wallpaper::{RawWallpaper, SolidWallpaper, Wallpaper, WallpaperError};
