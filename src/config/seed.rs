//! Seed outline selection
//!
//! Precedence: an explicit `--seed` file, then `categories.txt` in the data
//! directory, then the built-in demo outline. Seeding can be switched off
//! from the command line or in settings.

use std::path::PathBuf;

use super::paths::BookkeeperPaths;
use super::settings::Settings;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::storage::DEMO_CATEGORY_OUTLINE;

/// Seeding flags from the command line
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    pub seed_file: Option<PathBuf>,
    pub no_seed: bool,
}

/// The outline to seed with, or `None` to start empty
pub fn resolve_seed_outline(
    options: &SeedOptions,
    paths: &BookkeeperPaths,
    settings: &Settings,
) -> BookkeeperResult<Option<String>> {
    if options.no_seed || !settings.seed_demo_data {
        return Ok(None);
    }

    if let Some(path) = &options.seed_file {
        let outline = std::fs::read_to_string(path).map_err(|e| {
            BookkeeperError::Startup(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        return Ok(Some(outline));
    }

    let override_file = paths.categories_file();
    if override_file.exists() {
        let outline = std::fs::read_to_string(&override_file)
            .map_err(|e| BookkeeperError::Io(format!("Failed to read category outline: {}", e)))?;
        return Ok(Some(outline));
    }

    Ok(Some(DEMO_CATEGORY_OUTLINE.to_string()))
}

/// Write the demo outline to `categories.txt` for editing
///
/// Returns `false` and leaves the file alone when one already exists.
pub fn write_outline_template(paths: &BookkeeperPaths) -> BookkeeperResult<bool> {
    let path = paths.categories_file();
    if path.exists() {
        return Ok(false);
    }

    paths.ensure_directories()?;
    std::fs::write(&path, DEMO_CATEGORY_OUTLINE)
        .map_err(|e| BookkeeperError::Io(format!("Failed to write category outline: {}", e)))?;
    Ok(true)
}
