/// Recently loaded image paths, most recent last.

use std::path::{Path, PathBuf};

/// Path to the recent images file.
pub fn recent_path() -> Option<PathBuf> {
    Some(super::data_dir()?.join("recent"))
}

/// Load recent paths from disk. Returns an empty vec if the file doesn't exist.
pub fn load_recent() -> Vec<String> {
    match recent_path() {
        Some(p) => load_recent_from(&p),
        None => Vec::new(),
    }
}

pub fn load_recent_from(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Move `entry` to the end of `entries`, dropping older duplicates, and keep at most `limit`.
pub fn remember(entries: &mut Vec<String>, entry: &str, limit: usize) {
    entries.retain(|e| e != entry);
    entries.push(entry.to_string());
    let start = entries.len().saturating_sub(limit);
    entries.drain(..start);
}

/// Save recent paths to disk.
pub fn save_recent_to(path: &Path, entries: &[String]) {
    if let Err(e) = std::fs::write(path, entries.join("\n").as_bytes()) {
        tracing::warn!(path = %path.display(), error = %e, "could not save recent images");
    }
}
