//! Terminal setup, teardown and the TUI view
//!
//! Handles raw mode and the alternate screen (with a panic hook that
//! restores the terminal), and drives the event loop of `TuiView`.

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::BookkeeperResult;
use crate::models::{Budget, Category, Expense};
use crate::services::BudgetAnalysis;
use crate::view::{dispatch, HandlerRegistry, Intent, View};

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_key;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> BookkeeperResult<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> BookkeeperResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Full-screen terminal client
pub struct TuiView {
    app: App,
    handlers: HandlerRegistry,
}

impl TuiView {
    pub fn new(settings: Settings) -> Self {
        Self {
            app: App::new(settings),
            handlers: HandlerRegistry::default(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Feed one key press through the UI
    pub fn press(&mut self, key: KeyEvent) {
        if let Some(intent) = handle_key(&mut self.app, key) {
            self.apply(intent);
        }
    }

    /// Dispatch an intent and report the outcome on screen
    pub fn apply(&mut self, intent: Intent) {
        let description = intent.describe();
        debug!(intent = description, "Dispatching intent");

        match dispatch(self, intent) {
            Ok(()) => self.app.finish(description),
            Err(err) => {
                warn!(intent = description, error = %err, "Intent rejected");
                self.app.report_error(err.to_string());
            }
        }
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> BookkeeperResult<()> {
        let events = EventHandler::default();

        while !self.app.should_quit {
            terminal.draw(|frame| super::views::render(frame, &self.app))?;

            match events.next()? {
                Event::Key(key) => self.press(key),
                // Redrawn on the next pass
                Event::Resize(_, _) | Event::Tick => {}
            }
        }

        Ok(())
    }
}

impl View for TuiView {
    fn show_expenses(&mut self, expenses: &[Expense], _categories: &[Category]) {
        self.app.expenses = expenses.to_vec();
        self.app.clamp_selection();
    }

    fn show_categories(&mut self, categories: &[Category]) {
        self.app.categories = categories.to_vec();
        self.app.clamp_selection();
    }

    fn show_budgets(&mut self, budgets: &[Budget], _categories: &[Category]) {
        self.app.budgets = budgets.to_vec();
        self.app.clamp_selection();
    }

    fn show_budget_analysis(&mut self, analysis: &BudgetAnalysis) {
        self.app.analysis = *analysis;
    }

    fn run(&mut self) -> BookkeeperResult<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal()?;
        result
    }

    fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }
}
