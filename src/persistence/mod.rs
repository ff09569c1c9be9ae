pub mod config;
pub mod recent;

use std::path::PathBuf;

const APP_DIR: &str = "simucolormix";

/// Get or create the data directory (~/.local/share/simucolormix/).
pub fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join(APP_DIR);
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Get or create the config directory (~/.config/simucolormix/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join(APP_DIR);
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
