// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime - countdown timers and alarm schedules

mod commands;
mod completions;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{alarm, recover, timer};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::completions::CompletionsArgs;
use crate::error::ChimeError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "chime", version, about = "Chime - countdown timers and alarms")]
struct Cli {
    /// Data directory holding the timer store and chime.toml [default: $CHIME_DATA_DIR]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Countdown timers
    Timer {
        #[command(subcommand)]
        command: timer::TimerCommand,
    },
    /// Alarm schedules
    Alarm {
        #[command(subcommand)]
        command: alarm::AlarmCommand,
    },
    /// Reconcile timers after a reboot or a wall clock change
    Recover(recover::RecoverArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ChimeError>() {
                Some(chime) => eprint!("{}", chime),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.format;
    match cli.command {
        Commands::Timer { command } => {
            let mut model = commands::open_model(cli.data_dir.as_deref())?;
            timer::handle(&mut model, command, format)
        }
        Commands::Recover(args) => {
            let mut model = commands::open_model(cli.data_dir.as_deref())?;
            recover::handle(&mut model, args, format)
        }
        // Pure schedule math; never touches the store
        Commands::Alarm { command } => alarm::handle(command, format),
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
