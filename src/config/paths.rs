//! Path management for Bookkeeper
//!
//! ## Path Resolution Order
//!
//! 1. `BOOKKEEPER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/bookkeeper` or `~/.config/bookkeeper`
//! 3. Windows: `%APPDATA%\bookkeeper`

use std::path::{Path, PathBuf};

use crate::error::{BookkeeperError, BookkeeperResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BOOKKEEPER_DATA_DIR";

/// Manages all paths used by Bookkeeper
#[derive(Debug, Clone)]
pub struct BookkeeperPaths {
    base_dir: PathBuf,
}

impl BookkeeperPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> BookkeeperResult<Self> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (`--data-dir`, tests)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the log file written while the terminal UI owns the screen
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("bookkeeper.log")
    }

    /// Path to the optional category outline that replaces the demo tree
    pub fn categories_file(&self) -> PathBuf {
        self.base_dir.join("categories.txt")
    }

    /// Create the base directory if missing
    pub fn ensure_directories(&self) -> BookkeeperResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            BookkeeperError::Io(format!("Failed to create base directory: {}", e))
        })
    }

    /// Whether a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> BookkeeperResult<PathBuf> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                BookkeeperError::Config("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("bookkeeper"))
}

#[cfg(windows)]
fn resolve_default_path() -> BookkeeperResult<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BookkeeperError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("bookkeeper"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("bookkeeper.log"));
        assert_eq!(
            paths.categories_file(),
            temp_dir.path().join("categories.txt")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = BookkeeperPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path().join("nested").join("dir"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
