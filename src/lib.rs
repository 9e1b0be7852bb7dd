//! Bookkeeper - Terminal expense tracker
//!
//! Records expenses against a tree of categories and compares spending over
//! the last day, week and 30 days with the budgets set for those periods.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, paths and seed data selection
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (categories, expenses, budgets)
//! - `storage`: Repository abstraction and in-memory store
//! - `services`: Category tree building and period aggregation
//! - `view`: The contract every user interface implements
//! - `presenter`: Wires a view to the store and keeps it in sync
//! - `display`: Plain-text formatting
//! - `shell`: Line-oriented client
//! - `tui`: Full-screen terminal client
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use bookkeeper::{presenter::Presenter, shell::ShellView, storage::Storage};
//!
//! let storage = Rc::new(Storage::new());
//! let view = ShellView::new(std::io::stdin().lock(), std::io::stdout(), Default::default());
//! Presenter::new(storage, view)?.run()?;
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod presenter;
pub mod services;
pub mod shell;
pub mod storage;
pub mod tui;
pub mod view;

pub use error::BookkeeperError;
