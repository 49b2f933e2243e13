pub mod analyze;
pub mod export;
pub mod info;

use std::path::{Path, PathBuf};

/// Resolve a session argument: an existing directory is used as is,
/// anything else is looked up under the configured sessions directory.
pub fn resolve_session(arg: &Path, sessions_dir: &Path) -> PathBuf {
    if arg.is_dir() || arg.is_absolute() {
        arg.to_path_buf()
    } else {
        sessions_dir.join(arg)
    }
}
