//! Data-directory resolution.

use std::path::PathBuf;

/// Resolve the Casebook data directory.
///
/// `CASEBOOK_DATA_DIR` wins when set; otherwise `~/.casebook`, falling
/// back to `./.casebook` when no home directory can be determined.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CASEBOOK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".casebook"),
        None => PathBuf::from(".casebook"),
    }
}
