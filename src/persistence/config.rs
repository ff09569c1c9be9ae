use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::picture::selection::DEFAULT_COORDINATE;
use crate::plot::types::SWATCH_SIZE;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Preferred X/Y when a new image is loaded (clamped to the image).
    pub default_coordinate: u32,
    /// Edge length in pixels of the mixed color swatch.
    pub swatch_size: u32,
    /// Height in terminal rows for the bar chart.
    pub chart_height: u16,
    /// Height in terminal rows for the original image preview.
    pub preview_height: u16,
    /// Number of recently loaded image paths to remember.
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_coordinate: DEFAULT_COORDINATE,
            swatch_size: SWATCH_SIZE,
            chart_height: 14,
            preview_height: 12,
            recent_limit: 20,
        }
    }
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    Some(super::config_dir()?.join("config.toml"))
}

/// Load config from disk, returning defaults if the file doesn't exist or is invalid.
pub fn load_config() -> Config {
    let path = match config_path() {
        Some(p) => p,
        None => return Config::default(),
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(_) => {
            // Create default config file on first run
            let config = Config::default();
            if let Err(e) = write_default_config(path, &config) {
                tracing::warn!(path = %path.display(), error = %e, "could not write default config");
            }
            config
        }
    }
}

fn parse_config(content: &str) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid config, using defaults");
        Config::default()
    })
}

/// Write a default config file with comments.
fn write_default_config(path: &Path, config: &Config) -> std::io::Result<()> {
    let content = format!(
        "# SimuColorMix configuration\n\
         \n\
         # Preferred pixel coordinate for a newly loaded image\n\
         default_coordinate = {}\n\
         \n\
         # Edge length in pixels of the mixed color swatch\n\
         swatch_size = {}\n\
         \n\
         # Height in terminal rows for the bar chart\n\
         chart_height = {}\n\
         \n\
         # Height in terminal rows for the original image preview\n\
         preview_height = {}\n\
         \n\
         # Number of recently loaded images to remember\n\
         recent_limit = {}\n",
        config.default_coordinate,
        config.swatch_size,
        config.chart_height,
        config.preview_height,
        config.recent_limit,
    );
    std::fs::write(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.default_coordinate, 50);
        assert_eq!(c.swatch_size, 150);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let c = parse_config("swatch_size = 64\n");
        assert_eq!(c.swatch_size, 64);
        assert_eq!(c.default_coordinate, 50);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        assert_eq!(parse_config("swatch_size = \"big\""), Config::default());
    }

    #[test]
    fn test_first_run_writes_parseable_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let first = load_config_from(&path);
        assert!(path.exists());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_config(&written), first);
    }
}
