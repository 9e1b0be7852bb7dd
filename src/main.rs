use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bookkeeper::config::paths::DATA_DIR_ENV;
use bookkeeper::config::{
    resolve_seed_outline, write_outline_template, BookkeeperPaths, SeedOptions, Settings,
};
use bookkeeper::logging::{init_tracing, LogTarget};
use bookkeeper::presenter::Presenter;
use bookkeeper::shell::ShellView;
use bookkeeper::storage::{initialize_storage, Storage};
use bookkeeper::tui::TuiView;

#[derive(Parser)]
#[command(
    name = "bookkeeper",
    version,
    about = "Terminal expense tracker with day/week/month budgets",
    long_about = "Bookkeeper records expenses against a tree of categories and \
                  compares what you spent over the last day, week and 30 days \
                  with the budgets you set for those periods."
)]
struct Cli {
    /// Directory holding config.json, categories.txt and the log file
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seed the category tree from this outline file
    #[arg(long, global = true, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Start with no categories
    #[arg(long, global = true, conflicts_with = "seed")]
    no_seed: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Line-oriented shell reading commands from stdin
    Shell,

    /// Show current configuration and paths
    Config,

    /// Write config.json and an editable categories.txt to the data directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        println!("Error: {}", err);
        println!();
        println!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = match &cli.data_dir {
        Some(dir) => BookkeeperPaths::with_base_dir(dir),
        None => BookkeeperPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths).context("Failed to load settings")?;
    let command = cli.command.unwrap_or(Commands::Tui);

    match command {
        Commands::Config => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Commands::Init => {
            println!("Initializing Bookkeeper at: {}", paths.base_dir().display());
            settings.save(&paths).context("Failed to save settings")?;
            println!("Wrote {}", paths.settings_file().display());
            if write_outline_template(&paths)? {
                println!("Wrote {}", paths.categories_file().display());
            } else {
                println!("Kept existing {}", paths.categories_file().display());
            }
            println!("Initialization complete!");
            return Ok(());
        }
        _ => {}
    }

    let log_target = if command == Commands::Tui {
        paths.ensure_directories()?;
        LogTarget::File(paths.log_file())
    } else {
        LogTarget::Stderr
    };
    init_tracing(log_target, &settings.log_level)?;

    let storage = Rc::new(Storage::new());
    let options = SeedOptions {
        seed_file: cli.seed,
        no_seed: cli.no_seed,
    };
    if let Some(outline) = resolve_seed_outline(&options, &paths, &settings)? {
        initialize_storage(&storage, &outline).context("Failed to seed categories")?;
    }

    match command {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let view = ShellView::new(stdin.lock(), io::stdout(), settings).with_prompt(interactive);
            Presenter::new(storage, view)
                .context("Failed to start the shell")?
                .run()?;
        }
        _ => {
            Presenter::new(storage, TuiView::new(settings))
                .context("Failed to start the terminal UI")?
                .run()?;
        }
    }

    Ok(())
}

fn print_config(paths: &BookkeeperPaths, settings: &Settings) {
    let state = |exists: bool| if exists { "" } else { " (not present)" };

    println!("Bookkeeper Configuration");
    println!("========================");
    println!("Data directory:   {}", paths.base_dir().display());
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        state(paths.is_initialized())
    );
    println!(
        "Category outline: {}{}",
        paths.categories_file().display(),
        state(paths.categories_file().exists())
    );
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Seed demo data:  {}", settings.seed_demo_data);
    println!("  Log level:       {}", settings.log_level);
}
