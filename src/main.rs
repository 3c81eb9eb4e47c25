//! tablesort - click-to-sort tables in the terminal
//!
//! Opens a table document in an interactive view where header cells sort the
//! rows, or sorts headless with `--sort` and prints the result.

use std::io::{self, Stdout};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use tablesort::app::App;
use tablesort::cli::{self, Cli};
use tablesort::config::Config;
use tablesort::error::{AppError, Result};
use tablesort::events::EventHandler;
use tablesort::logging::{self, LogTarget};
use tablesort::sort::TableSorter;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> ExitCode {
    let args = Cli::parse();

    let target = if args.is_headless() {
        LogTarget::Stderr
    } else {
        LogTarget::default_file().unwrap_or(LogTarget::Stderr)
    };
    let _guard = match logging::init(target) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            None
        }
    };

    let result = run(&args);
    logging::shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "tablesort failed");
            eprintln!("tablesort: {}", e.user_message());
            if !args.is_headless() {
                if let Some(dir) = logging::log_directory() {
                    eprintln!("Logs: {}", dir.display());
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = args.load_config()?;
    let options = args.sort_options(&config.sort);
    let sorter = cli::open(&args.file, options)?;

    if args.is_headless() {
        let output = cli::run_headless(sorter, &args.sort, args.json)?;
        print!("{output}");
        return Ok(());
    }
    run_tui(sorter, args.title(), &config)
}

fn run_tui(sorter: TableSorter, title: String, config: &Config) -> Result<()> {
    let mut terminal = init_terminal(config.ui.mouse)?;
    let events = EventHandler::with_tick_rate(config.ui.tick_rate_ms);
    let mut app = App::new(sorter, title, &config.ui);
    info!("Entering event loop");

    let result = event_loop(&mut terminal, &events, &mut app);
    // Restore even when the loop failed.
    let restored = restore_terminal(&mut terminal, config.ui.mouse);
    result.and(restored)
}

fn event_loop(terminal: &mut Tui, events: &EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        app.update(events.next()?);
    }
    Ok(())
}

fn init_terminal(mouse: bool) -> Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui, mouse: bool) -> Result<()> {
    disable_raw_mode().map_err(|e| AppError::terminal(format!("disable raw mode: {e}")))?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
