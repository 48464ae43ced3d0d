//! Restaurant menu CLI - Daily menus of Turku's student restaurants
//!
//! Fetches the menu page (or today's cached copy), optionally filters it by
//! restaurant and meal search, and prints it to the terminal.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ruokalista::app::{App, AppError, Output};
use ruokalista::cli::{Cli, RunConfig};
use ruokalista::data::HttpFetcher;
use ruokalista::render::print_menu;

/// Logs go to stderr so the menu on stdout stays clean
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<(Output, bool), AppError> {
    let config = RunConfig::from_cli(cli, Local::now().date_naive())?;
    let color = config.color && io::stdout().is_terminal();

    let fetcher = HttpFetcher::new()?;
    let app = App::new(config, fetcher);

    Ok((app.run().await?, color))
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();

    let (output, color) = match run(&cli).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    let written = match output {
        Output::Listing(lines) => lines
            .iter()
            .try_for_each(|line| writeln!(stdout, "{}", line)),
        Output::Menu(menu) => print_menu(&mut stdout, &menu, color),
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}
