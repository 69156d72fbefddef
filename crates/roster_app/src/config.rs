use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use roster_core::StalePolicy;
use roster_engine::{ControllerOptions, HttpSettings, QueryParams};
use roster_logging::{LevelFilter, LogDestination};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILENAME: &str = "roster.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings loaded from `roster.ron`; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page_param: String,
    pub limit_param: String,
    pub search_param: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub initial_page: u32,
    pub stale_policy: StalePolicy,
    pub log: LogTarget,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let http = HttpSettings::default();
        Self {
            base_url: http.base_url,
            page_param: http.params.page,
            limit_param: http.params.limit,
            search_param: http.params.search,
            connect_timeout_secs: http.connect_timeout.as_secs(),
            request_timeout_secs: http.request_timeout.as_secs(),
            max_bytes: http.max_bytes,
            initial_page: 1,
            stale_policy: StalePolicy::default(),
            log: LogTarget::default(),
            log_file: PathBuf::from("./roster.log"),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Resolve the config for a run: the file named on the command line
    /// (which must exist), else `./roster.ron` if present, else defaults.
    /// Command-line flags win over file values.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => load(path)?,
            None => load_optional(Path::new(DEFAULT_CONFIG_FILENAME))?,
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        if let Some(initial_page) = cli.initial_page {
            self.initial_page = initial_page;
        }
        self.debug |= cli.debug;
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            params: QueryParams {
                page: self.page_param.clone(),
                limit: self.limit_param.clone(),
                search: self.search_param.clone(),
            },
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            initial_page: self.initial_page,
            stale_policy: self.stale_policy,
        }
    }

    /// Longest a command waits for its fetch before rendering anyway.
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .saturating_add(self.request_timeout_secs)
                .saturating_add(1),
        )
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}

fn load_optional(path: &Path) -> Result<AppConfig, ConfigError> {
    match load(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(AppConfig::default())
        }
        other => other,
    }
}
