//! Init command - write a default configuration file.

use std::path::Path;
use streetlevel::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Writes the current (or default) configuration to `path`.
///
/// An existing file is loaded first so its values survive; missing keys are
/// filled in with defaults.
pub fn write_config(path: &Path) -> Result<ConfigFile, CliError> {
    let config = ConfigFile::load_from(path)?;
    config.save_to(path)?;
    Ok(config)
}

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();
    write_config(&path)?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize streetlevel settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_config_creates_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let config = write_config(&path).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!(path.exists());
    }

    #[test]
    fn test_write_config_keeps_existing_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[streetview]\nzoom = 2\n").unwrap();

        let config = write_config(&path).unwrap();
        assert_eq!(config.streetview.zoom, 2);
        assert_eq!(ConfigFile::load_from(&path).unwrap().streetview.zoom, 2);
    }
}
