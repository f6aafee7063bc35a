mod app;
mod countdown;
mod domain;
mod input;
mod notifications;
mod persistence;
mod report;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use countdown::{CountdownEngine, TickOutcome};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifications::{AlertPlayer, SilentAlert, TerminalBell};
use persistence::{
    config_file, ensure_data_dir, init_local_data_dir, load_and_persist, load_config, log_file,
    Config, JsonFileStorage, STATE_KEY,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use store::TaskStore;

#[derive(Parser)]
#[command(name = "onetask")]
#[command(about = "A terminal focus timer: one task at a time, with history and statistics", long_about = None)]
struct Cli {
    /// Log debug output (ONETASK_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .onetask directory in the current directory
    Init,
    /// Write a statistics report for the completed history
    Report {
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete the completed task history
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_tracing(cli.verbose, None)?;
            let data_dir = init_local_data_dir()?;
            println!("Initialized onetask directory: {}", data_dir.display());
            println!();
            println!("onetask will now use this local directory for task storage.");
            println!("Run 'onetask' to start focusing.");
            Ok(())
        }
        Some(Commands::Report { output }) => {
            init_tracing(cli.verbose, None)?;
            let data_dir = ensure_data_dir()?;
            let report_path = report::generate_report(&data_dir, output)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Clear) => {
            init_tracing(cli.verbose, None)?;
            let data_dir = ensure_data_dir()?;
            let mut store = TaskStore::with_system_clock();
            load_and_persist(&mut store, JsonFileStorage::new(&data_dir), STATE_KEY);

            let count = store.completed_tasks().len();
            store.clear_completed_tasks();
            println!("Cleared {} completed task(s).", count);
            Ok(())
        }
        None => {
            let data_dir = ensure_data_dir()?;
            init_tracing(cli.verbose, Some(&log_file(&data_dir)))?;
            run_tui(&data_dir)
        }
    }
}

/// Install the global subscriber. The TUI owns the terminal, so its logs go to a file.
fn init_tracing(verbose: bool, log_path: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("ONETASK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let result = match log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
    };

    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn run_tui(data_dir: &Path) -> Result<()> {
    tracing::info!(dir = %data_dir.display(), "using data directory");

    let config_path = config_file(data_dir);
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid config, using defaults");
            Config::default()
        }
    };

    // Store starts in the loading state until the snapshot is applied
    let mut store = TaskStore::with_system_clock();
    load_and_persist(&mut store, JsonFileStorage::new(data_dir), STATE_KEY);

    let alert: Box<dyn AlertPlayer> = if config.alert_enabled {
        Box::new(TerminalBell::new(config.alert_repeat()))
    } else {
        Box::new(SilentAlert::default())
    };
    let countdown = CountdownEngine::new(alert, ticker::tick_duration(config.tick_interval_ms));
    let mut app = AppState::new(store, countdown, config).with_config_path(config_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = &result {
        tracing::error!(error = %err, "app loop failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Block until a key arrives or the next tick is due
        if event::poll(app.poll_timeout())? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Tick the countdown
        if let TickOutcome::Expired { end_timestamp } = app.tick() {
            tracing::debug!(end_timestamp, "waiting for acknowledgment");
        }
    }
}
