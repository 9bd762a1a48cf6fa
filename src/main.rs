//! Viewfinder demo CLI
//!
//! Drives the capture screen core against the fake camera device:
//! surface comes up, a layout pass places the shutter button, one photo
//! is taken and optionally written to disk, then the surface goes away.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use viewfinder::{CameraScreen, FakeCamera, FileConfig, RecordingSink, ShutterGlyph, SurfaceEvent};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "viewfinder", version, about = "Camera capture screen demo")]
struct Args {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 1920)]
    height: u32,

    /// Device rotation in degrees (0, 90, 180, or 270).
    #[arg(long, default_value_t = 0)]
    rotation: u16,

    /// Optional TOML config file for layout and capture tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the captured JPEG to this path.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Viewfinder v{}", viewfinder::VERSION);
    info!("This is a demonstration using the fake camera device");

    let config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let mut screen = CameraScreen::new(
        FakeCamera::new(),
        RecordingSink::default(),
        config.layout,
        config.capture,
    );

    // Surface comes up and the first layout pass runs.
    screen.handle_surface_event(SurfaceEvent::Available {
        width: args.width,
        height: args.height,
    });
    let shutter_frame = screen.layout_pass(args.width as f32, args.height as f32, args.rotation);

    let glyph = ShutterGlyph::render(shutter_frame);
    info!(
        "Shutter button at ({}, {}) with {} path commands",
        shutter_frame.left,
        shutter_frame.top,
        glyph.outer.commands().len() + glyph.inner.commands().len()
    );

    match screen.session().resolution() {
        Some(size) => info!("Preview running at {}", size),
        None => warn!("Preview unavailable"),
    }

    // The user taps the shutter.
    if let Err(e) = screen.capture_tap() {
        warn!("Capture rejected: {}", e);
    }

    if let Some(photo) = screen.sink().results.first() {
        println!(
            "Captured {}x{} photo, {} JPEG bytes, success: {}",
            photo.width,
            photo.height,
            photo.image_bytes.len(),
            photo.success
        );

        if let Some(path) = &args.output {
            if photo.success {
                match std::fs::write(path, &photo.image_bytes) {
                    Ok(()) => info!("Photo written to {}", path.display()),
                    Err(e) => warn!("Failed to write photo: {}", e),
                }
            } else {
                warn!("Capture failed, nothing written");
            }
        }
    }

    // Leaving the page tears the camera down.
    screen.handle_surface_event(SurfaceEvent::Destroyed);
    info!("Done");
}
