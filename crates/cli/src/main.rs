// moneygrid CLI - show and edit the money grid from a terminal

mod exit_codes;
mod render;
mod tui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;

use moneygrid_config::{load_settings, save_settings, FileStore};
use moneygrid_core::{Board, Settings, SettingsField, SettingsForm};

use exit_codes::{CliError, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "mgrid")]
#[command(about = "Visualise money held, earmarked and still needed as a grid of cells")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Settings file (defaults to <config dir>/moneygrid/settings.json)
    #[arg(long, global = true, env = "MGRID_SETTINGS", value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid
    #[command(after_help = "\
Examples:
  mgrid show
  mgrid show --plain
  mgrid show --json | jq .counts")]
    Show {
        /// One character per cell, no colours
        #[arg(long, conflicts_with = "json")]
        plain: bool,

        /// Settings, cells and totals as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change settings; unspecified fields keep their stored values
    #[command(after_help = "\
Examples:
  mgrid set --has 1200 --to-spend 450
  mgrid set --cell-weight 100 --rows 5 --columns 10
  mgrid set --to-spend ''          (blank amount means 0)")]
    Set {
        /// Money represented by one cell (>= 1)
        #[arg(long, value_name = "N")]
        cell_weight: Option<String>,

        /// Number of rows (1-50)
        #[arg(long, value_name = "N")]
        rows: Option<String>,

        /// Number of columns (1-50)
        #[arg(long, value_name = "N")]
        columns: Option<String>,

        /// Amount currently held
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        has: Option<String>,

        /// Amount earmarked for spending
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        to_spend: Option<String>,
    },

    /// Restore the default settings
    Reset,

    /// Print the settings file location
    Path,

    /// Interactive grid view with an edit dialog (default)
    View,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut store = match cli.settings {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default(),
    };
    log::debug!("Settings file: {}", store.path().display());

    let result = match cli.command.unwrap_or(Commands::View) {
        Commands::Show { plain, json } => cmd_show(&store, plain, json),
        Commands::Set {
            cell_weight,
            rows,
            columns,
            has,
            to_spend,
        } => cmd_set(
            &mut store,
            [
                (SettingsField::CellWeight, cell_weight),
                (SettingsField::RowsCount, rows),
                (SettingsField::ColumnsCount, columns),
                (SettingsField::Has, has),
                (SettingsField::ToSpend, to_spend),
            ],
        ),
        Commands::Reset => cmd_reset(&mut store),
        Commands::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
        Commands::View => cmd_view(&mut store),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            e.print();
            ExitCode::from(e.code)
        }
    }
}

fn cmd_show(store: &FileStore, plain: bool, json: bool) -> Result<(), CliError> {
    let board = Board::new(load_settings(store));
    let out = io::stdout();
    let color = !plain && !json && out.is_tty();
    let mut w = out.lock();

    let written = if json {
        render::print_json(&board, &mut w)
    } else if color {
        render::print_color(&board, &mut w)
    } else {
        render::print_plain(&board, &mut w)
    };
    written
        .and_then(|()| w.flush())
        .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot write output: {}", e)))
}

fn cmd_set(
    store: &mut FileStore,
    overrides: [(SettingsField, Option<String>); 5],
) -> Result<(), CliError> {
    if overrides.iter().all(|(_, v)| v.is_none()) {
        return Err(CliError::new(
            EXIT_USAGE,
            "nothing to change (see `mgrid set --help`)",
        ));
    }

    let current = load_settings(&*store);
    let mut form = SettingsForm::from_settings(&current);
    for (field, value) in overrides {
        if let Some(text) = value {
            form.set(field, text);
        }
    }

    let updated = form.submit()?;
    save_settings(store, &updated)?;
    print_change(&current, &updated);
    Ok(())
}

fn print_change(before: &Settings, after: &Settings) {
    for field in SettingsField::ALL {
        let (old, new) = (before.get(field), after.get(field));
        if old != new {
            println!("{}: {} -> {}", field.label(), old, new);
        }
    }
}

fn cmd_reset(store: &mut FileStore) -> Result<(), CliError> {
    save_settings(store, &Settings::default())?;
    println!("Settings reset to defaults");
    Ok(())
}

fn cmd_view(store: &mut FileStore) -> Result<(), CliError> {
    if !io::stdout().is_tty() {
        return Err(CliError::new(
            EXIT_USAGE,
            "view needs a terminal; use `mgrid show` for piped output",
        ));
    }
    let board = Board::new(load_settings(&*store));
    tui::run(board, store).map_err(|e| CliError::new(EXIT_ERROR, e))
}
