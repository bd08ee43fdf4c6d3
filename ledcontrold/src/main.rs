//! Process entry point: parses CLI flags, builds the strip, the
//! animation controller, the frame arbiter, and (optionally) the
//! animation-clock sync component, then runs until interrupted.

mod cli;
mod patterns;
mod wiring;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = wiring::build_settings(&cli).context("building initial settings")?;
    let runtime = wiring::build_runtime(&cli, settings).context("starting animation core")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            log::info!("shutdown signal received");
            shutdown.store(true, Ordering::SeqCst);
        })
        .context("installing SIGINT handler")?;
    }

    log::info!(
        "ledcontrold running: {} LEDs at {:.1} Hz, arbiter state {:?}",
        cli.led_count,
        cli.refresh_rate,
        runtime.arbiter.state()
    );

    let poll_interval = Duration::from_millis(cli.health_poll_interval_ms.max(50));
    while !shutdown.load(Ordering::SeqCst) {
        std::thread::sleep(poll_interval);
        runtime.arbiter.poll_health();
        log::debug!(
            "arbiter state {:?}, animation fps {:.1}",
            runtime.arbiter.state(),
            runtime.animation.get_frame_rate()
        );
    }

    log::info!("shutting down");
    runtime.shutdown();
    Ok(())
}
