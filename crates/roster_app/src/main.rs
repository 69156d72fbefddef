mod app;
mod cli;
mod commands;
mod config;
mod model;
mod render;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use roster_engine::{HttpPageSource, PagedListController};
use roster_logging::roster_info;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::model::Character;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;

    roster_logging::initialize(config.log.into(), config.log_level(), &config.log_file);
    roster_info!(
        "Starting roster base_url={} stale_policy={:?}",
        config.base_url,
        config.stale_policy
    );

    let source = HttpPageSource::<Character>::new(config.http_settings())
        .context("building HTTP client")?;
    let mut controller =
        PagedListController::<Character>::new(Arc::new(source), config.controller_options())
            .context("starting fetch engine")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(
        &mut controller,
        stdin.lock(),
        &mut stdout.lock(),
        config.wait_timeout(),
    )?;

    roster_info!("Exiting");
    Ok(())
}
