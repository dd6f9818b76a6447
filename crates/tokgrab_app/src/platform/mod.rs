//! Terminal shell around the core state machine and the conversion engine.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokgrab_logging::grab_info;

pub fn run() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    logging::initialize(
        tokgrab_logging::level_for_verbosity(cli.verbose),
        logging::LogDestination::from_log_file(cli.log_file.clone()),
    );

    let file_config = match cli.config.as_deref() {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };
    let settings = config::resolve_settings(file_config, &cli);
    grab_info!("using conversion endpoint {}", settings.endpoint);

    let runner = app::App::new(settings).context("failed to start conversion engine")?;
    runner.run(cli.urls)
}
