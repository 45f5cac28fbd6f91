//! Configuration loading and root folder resolution

use std::path::{Path, PathBuf};

/// Environment variable consulted when no command-line root folder is given
pub const ROOT_ENV_VAR: &str = "TUNEVAULT_ROOT";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (`TUNEVAULT_ROOT`)
/// 3. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: OS-dependent compiled default
    default_root_folder()
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tunevault"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/tunevault"))
}

/// Database file path within the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join("tunevault.db")
}

/// Media directory (uploaded artwork and audio) within the root folder
pub fn media_dir(root_folder: &Path) -> PathBuf {
    root_folder.join("media")
}

/// Ensure the root folder and media directory exist
pub fn ensure_directories(root_folder: &Path) -> crate::Result<()> {
    std::fs::create_dir_all(root_folder)?;
    std::fs::create_dir_all(media_dir(root_folder))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/tunevault-test"));
        assert_eq!(root, PathBuf::from("/tmp/tunevault-test"));
    }

    #[test]
    fn derived_paths_live_under_root() {
        let root = PathBuf::from("/srv/tunevault");
        assert_eq!(database_path(&root), root.join("tunevault.db"));
        assert_eq!(media_dir(&root), root.join("media"));
    }

    #[test]
    fn ensure_directories_creates_media_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("library");
        ensure_directories(&root).unwrap();
        assert!(media_dir(&root).is_dir());
    }
}
