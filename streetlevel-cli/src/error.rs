//! CLI error handling with user-friendly messages.

use std::fmt;
use std::path::PathBuf;
use std::process;
use streetlevel::config::ConfigFileError;
use streetlevel::provider::ProviderError;
use streetlevel::PanoramaError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    Config(ConfigFileError),
    /// Panorama record file could not be read or parsed
    PanoramaFile { path: PathBuf, reason: String },
    /// Missing or contradictory arguments
    Usage(String),
    /// HTTP client or async runtime could not be created
    Setup(String),
    /// Reconstruction failed
    Panorama(PanoramaError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Panorama(PanoramaError::FetchFailure(ProviderError::HttpError(_))) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. The panorama id does not exist or was removed");
                eprintln!("  2. The requested zoom level is not available for this panorama");
                eprintln!("  3. Network access to the tile servers is blocked");
            }
            CliError::Panorama(PanoramaError::InvalidState(_)) => {
                eprintln!();
                eprintln!("Street View panorama records need 'tile_size' and 'image_sizes'.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Check {} or run 'streetlevel init' to write defaults.",
                    streetlevel::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::PanoramaFile { path, reason } => {
                write!(f, "Failed to read panorama '{}': {}", path.display(), reason)
            }
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Setup(msg) => write!(f, "Setup failed: {}", msg),
            CliError::Panorama(e) => write!(f, "Panorama download failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Panorama(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<PanoramaError> for CliError {
    fn from(e: PanoramaError) -> Self {
        CliError::Panorama(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Setup(e.to_string())
    }
}
