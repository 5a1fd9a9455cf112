//! `mparallel man` – roff man page.

use anyhow::Result;
use clap::CommandFactory;
use std::io::Write;

use crate::cli::Cli;

pub fn run_man(out: &mut dyn Write) -> Result<()> {
    clap_mangen::Man::new(Cli::command()).render(out)?;
    Ok(())
}
