//! Trace replay
//!
//! Runs each trace event through the same per-tick path the device uses:
//! `TouchTracker::update` folds the poll into a sample and `Shell::tick`
//! classifies and repaints.

use anyhow::{anyhow, Result};
use embedded_graphics::prelude::*;
use platform::{GraphicsSurface, RawWallpaper, TouchTracker};
use shell::{DesktopAction, Devices, Screen, Shell, ShellConfig};
use tracing::{debug, info};

use crate::{
    devices::{EchoBackend, SimKeyboard},
    framebuffer::Framebuffer,
    trace::TraceEvent,
};

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub start: Screen,
    pub offline: bool,
}

pub struct Report {
    pub framebuffer: Framebuffer,
    pub actions: Vec<DesktopAction>,
    pub screen: Screen,
    pub ticks: usize,
    pub messages_sent: usize,
}

/// Diagonal RGB565 gradient used as the desktop wallpaper.
pub fn gradient(size: Size) -> Vec<u16> {
    let (w, h) = (size.width.max(2), size.height.max(2));
    let mut data = Vec::with_capacity(size.width as usize * size.height as usize);
    for y in 0..size.height {
        for x in 0..size.width {
            let r = x * 31 / (w - 1);
            let g = y * 63 / (h - 1);
            let b = 31 - (x + y) * 31 / (w + h - 2);
            data.push(u16::try_from((r << 11) | (g << 5) | b).unwrap_or(0));
        }
    }
    data
}

pub fn run(events: &[TraceEvent], options: Options) -> Result<Report> {
    let config = ShellConfig::default();
    let size = config.screen;
    let pixels = gradient(size);
    let wallpaper = RawWallpaper::new(size.width, size.height, &pixels)
        .map_err(|e| anyhow!("wallpaper: {e}"))?;

    let mut surface = GraphicsSurface::new(Framebuffer::new(size));
    let mut keyboard = SimKeyboard::new();
    let mut backend = EchoBackend::new(options.offline);
    // The scene carries its scratch row buffer inline; keep it off the stack.
    let mut shell = Box::new(Shell::new(&config));
    let mut tracker = TouchTracker::new();
    let mut actions = Vec::new();
    let mut ticks = 0;

    let mut devices = Devices {
        surface: &mut surface,
        wallpaper: &wallpaper,
        keyboard: &mut keyboard,
        backend: &mut backend,
    };
    match options.start {
        Screen::Desktop => shell.draw(&mut devices)?,
        Screen::Chat => shell.open(Screen::Chat, &mut devices)?,
    }

    for event in events {
        match event {
            TraceEvent::Touch {
                now_ms,
                pressed,
                point,
            } => {
                let sample = tracker.update(pressed.then_some(*point), *now_ms);
                if let Some(action) = shell.tick(sample, &mut devices)? {
                    info!(?action, at_ms = now_ms, "desktop action");
                    actions.push(action);
                }
                ticks += 1;
            }
            TraceEvent::Type(text) => {
                devices.keyboard.type_text(text);
                if shell.current() == Screen::Chat {
                    shell.draw(&mut devices)?;
                } else {
                    debug!(text, "typed outside the chat, kept for later");
                }
            }
        }
    }

    let screen = shell.current();
    drop(devices);
    Ok(Report {
        framebuffer: surface.into_inner(),
        actions,
        screen,
        ticks,
        messages_sent: backend.sent(),
    })
}
