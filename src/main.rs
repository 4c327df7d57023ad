// What you SEE:
// • The calibration image, fitted to your screen, with preset ranges already whitened.
// • Left click: sample that pixel's color (a black marker appears, color is logged).
// • Right click on a marker: remove it; the view resets to presets only.
// • M: compute the min/max range of all samples and whiten every pixel inside it.
// • ESC (or closing the window) quits.

mod config;
mod draw;
mod error;
mod mask;
mod presets;
mod registry;
mod screen;
mod session;
mod source;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Config};
use draw::Drawer;
use session::{Flow, Session};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(Args::parse()).context("Failed to load configuration")?;

    /* --- Image setup ---
       The original stays untouched; the session keeps a working copy to mask. */
    let screen = match config.screen {
        Some(s) => s,
        None => screen::primary_screen_size().context("Failed to query screen size")?,
    };
    log::debug!("fitting image to screen {screen}");

    let original = source::load_fitted(&config.image, screen, config.reserve)
        .with_context(|| format!("Failed to load image {}", config.image.display()))?;

    let mut session = Session::new(original, config.presets, config.radius, config.hud)
        .context("Failed to apply preset ranges")?;

    let first = session.render();
    let mut drawer = Drawer::new("image", first.width, first.height)?;
    drawer.present(&first)?;

    println!("Chromakey test program");
    println!("Press m to update the mask, escape to exit");

    /* ------------------------------ Main loop ------------------------------ */
    'running: loop {
        let mut dirty = false;

        // Events are handled one by one, in the order the window reported them.
        for event in drawer.poll_events() {
            match session.handle(event)? {
                Flow::Quit => break 'running,
                Flow::Redraw => dirty = true,
                Flow::Unchanged => {}
            }
        }

        if dirty {
            drawer.present(&session.render())?;
        } else {
            drawer.idle();
        }
    }

    match session.last_range() {
        Some(r) => log::info!(
            "last range over {} point(s): min {:?}, max {:?}",
            session.registry().len(),
            r.min.0,
            r.max.0
        ),
        None => log::info!("exiting without a computed range"),
    }
    Ok(())
}
