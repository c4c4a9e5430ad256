#![deny(unsafe_code)]
//! Windowed viewer for the metaballs animation.
//!
//! Opens a centered 600x600 window and animates the selected preset until
//! the window is closed or Escape is released. With no arguments the
//! reference (`bounded`) preset runs.

mod error;
mod input;
mod runner;
mod stats;
mod window;

use clap::Parser;
use error::ViewerError;
use metaballs_core::SceneConfig;
use runner::Viewer;
use std::process;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "metaballs", about = "Real-time 2D metaballs animation")]
struct Cli {
    /// Scene preset (bounded, unbounded).
    #[arg(long, default_value = "bounded")]
    variant: String,
}

fn run(cli: Cli) -> Result<(), ViewerError> {
    let config = SceneConfig::from_name(&cli.variant)?;
    config.validate()?;
    tracing::info!(variant = %cli.variant, "starting metaballs");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config);
    event_loop.run_app(&mut viewer)?;
    viewer.finish()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
