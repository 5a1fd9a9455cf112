//! `mparallel completions` – shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

use crate::cli::Cli;

pub fn run_completions(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Cli::command(), "mparallel", out);
}
