use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{RenderConfig, Session};
use image::{imageops, RgbaImage};
use log::info;

mod cli;
mod display;
mod logger;
mod scene;

use cli::Args;
use display::HeadlessDisplay;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let config = RenderConfig::default()
        .with_resolution(args.width, args.height)
        .with_path_tracing(args.path_trace)
        .with_patch_size(args.patch_size)
        .with_threads(args.threads)
        .with_seed(args.seed);

    let scene = scene::lamp_room(args.path_trace, args.scene_seed)
        .context("Failed to build the lamp room scene")?;
    let camera = scene::room_camera(args.width, args.height);
    info!(
        "Scene ready: {} primitives, {} lights",
        scene.primitives().len(),
        scene.lights().len()
    );

    let mut rgba = opaque_black(config.rgba_len());
    let mut session = Session::new(scene, camera, config).context("Failed to start render")?;

    let budget = args.time.map(Duration::from_secs_f64);
    let mut display = HeadlessDisplay::new(args.passes, budget);
    session
        .run(&mut rgba, &mut display)
        .context("Render pass failed")?;

    save_png(&args.output, args.width, args.height, rgba)?;
    info!("Saved {}", args.output.display());
    Ok(())
}

/// RGBA buffer with every pixel set to opaque black.
fn opaque_black(len: usize) -> Vec<u8> {
    let mut rgba = vec![0u8; len];
    for pixel in rgba.chunks_exact_mut(4) {
        pixel[3] = 255;
    }
    rgba
}

/// Write the frame with row 0 at the bottom, as the camera renders it.
fn save_png(path: &Path, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
    let image = RgbaImage::from_raw(width, height, rgba)
        .context("Framebuffer does not match the image size")?;
    imageops::flip_vertical(&image)
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}
