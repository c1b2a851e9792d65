//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Provision a terraform stack, check an output, tear it down
#[derive(Parser)]
#[command(
    name = "infracheck",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file [default: ./infracheck.yaml]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply, assert the output is non-empty, then destroy
    Verify(commands::verify::VerifyArgs),

    /// Destroy a stack left behind by an interrupted run
    Destroy(commands::EngineArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot run to a verdict.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            command,
            ..
        } = self;
        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            json,
            config,
        });
        match command {
            Command::Verify(args) => commands::verify::run(&app, &args).await,
            Command::Destroy(args) => commands::destroy::run(&app, &args).await,
            Command::Version => {
                commands::version::run(&app);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
