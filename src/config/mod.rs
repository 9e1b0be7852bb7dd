//! Configuration module for Bookkeeper
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Choosing the category outline an empty store is seeded with

pub mod paths;
pub mod seed;
pub mod settings;

pub use paths::BookkeeperPaths;
pub use seed::{resolve_seed_outline, write_outline_template, SeedOptions};
pub use settings::Settings;
