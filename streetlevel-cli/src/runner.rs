//! CLI runner for common setup.
//!
//! Loads the configuration file, initializes logging and builds the tile
//! fetchers every download command needs.

use crate::error::CliError;
use streetlevel::config::ConfigFile;
use streetlevel::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use streetlevel::provider::{
    AsyncHttpTileFetcher, AsyncReqwestClient, HttpTileFetcher, ReqwestClient,
};
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging_guard = init_logging(&default_log_dir(), default_log_file())
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("streetlevel v{}", env!("CARGO_PKG_VERSION"));
        info!("streetlevel CLI: {} command", command);
    }

    /// Blocking fetcher sized by the `[download]` section.
    pub fn blocking_fetcher(&self) -> Result<HttpTileFetcher<ReqwestClient>, CliError> {
        let download = self.config.download_config();
        let client = ReqwestClient::with_timeout(download.timeout_secs())?;
        Ok(HttpTileFetcher::with_config(client, &download)?)
    }

    /// Async fetcher using the `[download]` timeout.
    pub fn async_fetcher(&self) -> Result<AsyncHttpTileFetcher<AsyncReqwestClient>, CliError> {
        let download = self.config.download_config();
        let client = AsyncReqwestClient::with_timeout(download.timeout_secs())?;
        Ok(AsyncHttpTileFetcher::new(client))
    }

    /// Multi-threaded tokio runtime for `--async` runs.
    pub fn runtime(&self) -> Result<tokio::runtime::Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Setup(format!("Failed to start async runtime: {}", e)))
    }
}
