//! Bankbook CLI - a small bank in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use bankbook_core::config::Config;
use bankbook_core::{init_logging, BankbookContext};

mod commands;
mod output;
mod prompt;
mod shell;

use commands::user;
use prompt::Prompt;

/// Bankbook - register, open accounts and move money from the terminal
#[derive(Parser)]
#[command(name = "bankbook", version, about, long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.bankbook)
    #[arg(long, env = "BANKBOOK_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Without a subcommand the interactive shell starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Administer registered users
    User {
        #[command(subcommand)]
        command: user::UserCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => commands::default_data_dir()?,
    };

    let config = Config::load(&data_dir)?;
    init_logging(
        cli.log_level.as_deref().unwrap_or(&config.log.level),
        config.log.format,
    );

    let mut ctx = BankbookContext::with_config(&data_dir, config)?;
    commands::report_skipped(&ctx.ledger);

    match cli.command {
        Some(Commands::User { command }) => user::run(&mut ctx.ledger, command),
        None => shell::run(&mut ctx.ledger, &mut Prompt::detect()),
    }
}
