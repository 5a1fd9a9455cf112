//! Tests for argument parsing of every subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run_short_flags() {
    match parse(&["mparallel", "run", "jobs.txt", "-m", "4096", "-j", "8"]) {
        CliCommand::Run {
            job,
            output_file,
            directory,
        } => {
            assert_eq!(job.job_file, Path::new("jobs.txt"));
            assert_eq!(job.max_memory, Some(4096));
            assert_eq!(job.jobs, Some(8));
            assert!(job.config.is_none());
            assert!(output_file.is_none());
            assert!(directory.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_long_flags() {
    match parse(&[
        "mparallel",
        "run",
        "jobs.txt",
        "--max-memory",
        "100",
        "--jobs",
        "2",
        "--output-file",
        "out.log",
        "--directory",
        "/tmp",
        "--config",
        "my.toml",
    ]) {
        CliCommand::Run {
            job,
            output_file,
            directory,
        } => {
            assert_eq!(job.max_memory, Some(100));
            assert_eq!(job.jobs, Some(2));
            assert_eq!(job.config.as_deref(), Some(Path::new("my.toml")));
            assert_eq!(output_file.as_deref(), Some(Path::new("out.log")));
            assert_eq!(directory.as_deref(), Some(Path::new("/tmp")));
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_output_and_directory_short() {
    match parse(&["mparallel", "run", "j", "-o", "o.log", "-C", "work"]) {
        CliCommand::Run {
            job,
            output_file,
            directory,
        } => {
            assert!(job.max_memory.is_none());
            assert!(job.jobs.is_none());
            assert_eq!(output_file.as_deref(), Some(Path::new("o.log")));
            assert_eq!(directory.as_deref(), Some(Path::new("work")));
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_requires_job_file() {
    assert!(Cli::try_parse_from(["mparallel", "run", "-m", "1", "-j", "1"]).is_err());
}

#[test]
fn cli_parse_rejects_non_numeric_memory() {
    assert!(Cli::try_parse_from(["mparallel", "run", "j", "-m", "lots"]).is_err());
    assert!(Cli::try_parse_from(["mparallel", "run", "j", "-j", "-1"]).is_err());
}

#[test]
fn cli_parse_check() {
    match parse(&["mparallel", "check", "jobs.txt", "-m", "10", "-j", "1", "--json"]) {
        CliCommand::Check { job, json } => {
            assert_eq!(job.job_file, Path::new("jobs.txt"));
            assert_eq!(job.max_memory, Some(10));
            assert!(json);
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["mparallel", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    match parse(&["mparallel", "man"]) {
        CliCommand::Man => {}
        _ => panic!("expected Man"),
    }
}
