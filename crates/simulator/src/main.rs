#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Host tooling: trace times and framebuffer sizes are small and fixed.
#![allow(clippy::arithmetic_side_effects)]
#![allow(missing_docs)]

//! Host simulator for the TouchDesk shell.
//!
//! Replays a touch trace through the shell on an in-memory 320x240 panel
//! and optionally writes the final frame as a PNG.
//!
//!   cargo run -p simulator -- crates/simulator/traces/demo.trace --snapshot out.png
//!   RUST_LOG=shell=debug cargo run -p simulator -- <trace>

mod devices;
mod framebuffer;
mod sim;
mod trace;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use platform::config::{dev_banner, APP_VERSION};
use shell::Screen;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulator", about = "Replay a touch trace through the TouchDesk shell")]
struct Cli {
    /// Trace file to replay
    trace: PathBuf,

    /// Write the final frame to this PNG
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Screen shown before the first event
    #[arg(long, value_enum, default_value_t = StartScreen::Desktop)]
    start: StartScreen,

    /// Answer every chat message with the offline error
    #[arg(long)]
    offline: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StartScreen {
    Desktop,
    Chat,
}

impl From<StartScreen> for Screen {
    fn from(start: StartScreen) -> Self {
        match start {
            StartScreen::Desktop => Screen::Desktop,
            StartScreen::Chat => Screen::Chat,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(version = APP_VERSION, "{}", dev_banner());

    let events = trace::load(&cli.trace)?;
    info!(events = events.len(), trace = %cli.trace.display(), "replaying");

    let report = sim::run(
        &events,
        sim::Options {
            start: cli.start.into(),
            offline: cli.offline,
        },
    )?;
    info!(
        ticks = report.ticks,
        actions = ?report.actions,
        screen = ?report.screen,
        messages = report.messages_sent,
        pixels = report.framebuffer.writes(),
        "replay finished"
    );

    if let Some(path) = cli.snapshot {
        report.framebuffer.save_png(&path)?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}
