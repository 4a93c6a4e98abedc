mod app;
mod bell;
mod bootstrap;
mod cli;
mod commands;
mod config;
mod logging;
mod runtime;
mod time_utils;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::DoughConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use time::UtcOffset;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Must run while the process is still single-threaded
    let local_offset = time_utils::local_offset();

    let cli = Cli::parse();
    let cfg = DoughConfig::load()?;
    if let Ok(path) = DoughConfig::log_path() {
        logging::init(&path);
    }

    match cli.command() {
        Commands::Run => run_tui(&cfg, local_offset).await,
        Commands::List => commands::list(&cfg, local_offset),
        Commands::Add { name, hours } => commands::add(&cfg, local_offset, name, hours),
        Commands::Delete { id } => commands::delete(&cfg, id),
        Commands::ConfigPath => commands::config_path(),
    }
}

async fn run_tui(cfg: &DoughConfig, local_offset: UtcOffset) -> Result<()> {
    let timer = bootstrap::initialize_timer(cfg, true)?;
    let mut app = App::new(timer, cfg, local_offset);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
