//! MOLA grid mapper.
//!
//! Overlays the sixteen MEGDR 128 pixel per degree tiles on a MOLA image
//! and lists the data files covering each region.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use mola_mapper::cli::{Cli, Command};
use mola_mapper::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level, cli.log_json) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = mola_mapper::exit_code(&e);
            debug!(exit_code = code, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(code)
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run(command: Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Overlay(args) => {
            commands::run_overlay(&args, &mut out)?;
        }
        Command::Report(args) => commands::run_report(&args, &mut out)?,
        Command::Locate(args) => commands::run_locate(&args, &mut out)?,
        Command::InspectLabel(args) => commands::run_inspect_label(&args, &mut out)?,
    }
    Ok(())
}
