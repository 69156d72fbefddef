use std::path::PathBuf;

use clap::Parser;

use crate::config::LogTarget;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Browse a paginated character list from the terminal")]
pub struct Cli {
    /// RON config file. Defaults to ./roster.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Listing endpoint, e.g. https://dragonball-api.com/api/characters
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
    /// Log at debug level.
    #[arg(long)]
    pub debug: bool,
    #[arg(long)]
    pub initial_page: Option<u32>,
}
