//! Terminal User Interface module
//!
//! A ratatui client for Bookkeeper: tabs for expenses, categories and
//! budgets, a spend vs budget panel, and modal forms for data entry.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::TuiView;
