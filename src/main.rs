//! Picklist Viewer - terminal viewer for liquid-handler picklists
//!
//! Shows how much liquid each well of a source and destination microplate
//! receives or gives up, flags wells over their ceiling, and provides
//! headless commands for checking picklists from scripts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use picklist_viewer::cli::{ConfigArgs, HoverArgs, InspectArgs, PlateOverrides, PlatesArgs};
use picklist_viewer::config::Config;
use picklist_viewer::constants::{APP_BINARY_NAME, APP_NAME};
use picklist_viewer::{logging, tui};

/// Picklist Viewer - visualize picklist well volumes on source and destination plates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Picklist CSV to open (defaults to the last one opened)
    #[arg(value_name = "FILE")]
    picklist: Option<PathBuf>,

    #[command(flatten)]
    plates: PlateOverrides,

    /// Write logs to this file while the TUI runs
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List source and destination plate names in a picklist
    Plates(PlatesArgs),
    /// Report well usage and overfull wells per plate
    Inspect(InspectArgs),
    /// Show what hovering a well would display
    Hover(HoverArgs),
    /// Show or change the saved configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        logging::init_stderr(cli.verbose);
        let result = match command {
            Command::Plates(args) => args.execute(),
            Command::Inspect(args) => args.execute(),
            Command::Hover(args) => args.execute(),
            Command::Config(args) => args.execute(),
        };
        if let Err(err) = result {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code.code());
        }
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        logging::init_file(path, cli.verbose)?;
    }

    // Settings problems should not keep the viewer from starting
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %format!("{e:#}"), "using default configuration");
        Config::default()
    });

    let effective = match cli.plates.resolve(config.clone()) {
        Ok(effective) => effective,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code.code());
        }
    };

    let picklist = match cli.picklist {
        Some(path) => {
            if !path.exists() {
                eprintln!("Error: Picklist file not found: {}", path.display());
                eprintln!();
                eprintln!("Please provide a valid path to a picklist CSV file.");
                eprintln!();
                eprintln!("Examples:");
                eprintln!("  {APP_BINARY_NAME} picklist.csv");
                eprintln!("  {APP_BINARY_NAME} path/to/run.csv --dest-rows 32 --dest-cols 48");
                eprintln!();
                eprintln!("For more options, run:");
                eprintln!("  {APP_BINARY_NAME} --help");
                std::process::exit(1);
            }
            Some(path)
        }
        None => config
            .ui
            .last_picklist
            .clone()
            .filter(|path| path.exists()),
    };

    tracing::info!(app = APP_NAME, picklist = ?picklist, "starting TUI");

    let mut app_state = tui::AppState::new(config, effective.plates, effective.ceilings)?;
    match &picklist {
        Some(path) => match app_state.open_picklist(path) {
            Ok(()) => app_state.remember_picklist(),
            Err(e) => app_state.set_error(format!("{e:#}")),
        },
        None => app_state.set_status("No picklist loaded. Press o to open one."),
    }

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    result
}
