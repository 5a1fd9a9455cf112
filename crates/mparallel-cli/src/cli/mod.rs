//! CLI for the mparallel scheduler.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_man, run_scheduler};

/// Top-level CLI for mparallel.
#[derive(Debug, Parser)]
#[command(name = "mparallel")]
#[command(
    about = "Run shell commands in parallel under a memory budget and a job limit",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Job file and the budgets to schedule it under.
#[derive(Debug, Args)]
pub struct JobArgs {
    /// Job file: alternating lines of memory requirement and shell command.
    pub job_file: PathBuf,

    /// Maximum total memory of all running jobs (same unit as the job file).
    #[arg(short = 'm', long, value_name = "N")]
    pub max_memory: Option<u64>,

    /// Maximum number of jobs running at once.
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Read defaults from this config file instead of ~/.config/mparallel/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run every job in the job file.
    Run {
        #[command(flatten)]
        job: JobArgs,

        /// Dump STDOUT and STDERR of all jobs to this file.
        #[arg(short = 'o', long, value_name = "PATH")]
        output_file: Option<PathBuf>,

        /// Run every command in this directory.
        #[arg(short = 'C', long, value_name = "DIR")]
        directory: Option<PathBuf>,
    },

    /// Validate the job file and print the order jobs would be considered in.
    Check {
        #[command(flatten)]
        job: JobArgs,

        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut stdout = io::stdout();

        match cli.command {
            CliCommand::Run {
                job,
                output_file,
                directory,
            } => run_scheduler(
                &job,
                output_file.as_deref(),
                directory.as_deref(),
                &mut stdout,
            )?,
            CliCommand::Check { job, json } => run_check(&job, json, &mut stdout)?,
            CliCommand::Completions { shell } => run_completions(shell, &mut stdout),
            CliCommand::Man => run_man(&mut stdout)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
