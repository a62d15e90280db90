use anyhow::{Context, Result};
use backend::glutils::{log_context_info, NativeGl};
use backend::logging::init_logging;
use backend::renderer::{run_frame_loop, Renderer};
use backend::system::System;

mod config;

use config::AppConfig;

// status for any failure before the first frame
const INIT_FAILURE_EXIT: i32 = -1;

fn run(config: &AppConfig) -> Result<()> {
    let mut system = System::new(&config.window).context("initialization failure")?;
    log_context_info();

    let gl = NativeGl;
    let renderer = Renderer::new(&gl, &config.scene, system.drawable_size())
        .context("renderer setup failure")?;

    run_frame_loop(&mut system, &renderer);

    // gpu objects go before the context and SDL itself
    drop(renderer);
    drop(system);
    Ok(())
}

fn main() {
    let config = AppConfig::default();
    init_logging(config.logging.clone());

    if let Err(e) = run(&config) {
        log::error!("{e:#}");
        std::process::exit(INIT_FAILURE_EXIT);
    }
}
