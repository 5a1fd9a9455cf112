//! Running a single job command to completion.
//!
//! [`CommandRunner`] is what worker threads call; [`ShellRunner`] hands the
//! command string to a shell (`sh -c` by default), optionally with output
//! redirected to a shared file and a fixed working directory. Any
//! `Fn(&str) -> io::Result<i32>` closure is also a runner.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::config::MparallelConfig;

/// Runs one command, blocking until it exits, and returns its exit code.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> io::Result<i32>;
}

impl<F> CommandRunner for F
where
    F: Fn(&str) -> io::Result<i32> + Send + Sync,
{
    fn run(&self, command: &str) -> io::Result<i32> {
        self(command)
    }
}

/// Runs commands through a shell as child processes.
#[derive(Debug)]
pub struct ShellRunner {
    shell: String,
    shell_arg: String,
    output: Option<File>,
    directory: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new(cfg: &MparallelConfig) -> Self {
        Self {
            shell: cfg.shell.clone(),
            shell_arg: cfg.shell_arg.clone(),
            output: None,
            directory: None,
        }
    }

    /// Send stdout and stderr of every command to `file`. All children share
    /// the same open file, so their output interleaves rather than overwrites.
    pub fn with_output(mut self, file: File) -> Self {
        self.output = Some(file);
        self
    }

    /// Start every command in `dir`.
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> io::Result<i32> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg(&self.shell_arg).arg(command);
        if let Some(dir) = &self.directory {
            cmd.current_dir(dir);
        }
        if let Some(out) = &self.output {
            cmd.stdout(out.try_clone()?);
            cmd.stderr(out.try_clone()?);
        }
        let status = cmd.status()?;
        Ok(exit_code(status))
    }
}

/// Exit code of a finished process; a signal-terminated process on Unix
/// reports the negated signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return -sig;
        }
    }
    -1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    fn runner() -> ShellRunner {
        ShellRunner::new(&MparallelConfig::default())
    }

    #[test]
    fn shell_runner_reports_exit_codes() {
        let r = runner();
        assert_eq!(r.run("true").unwrap(), 0);
        assert_eq!(r.run("exit 3").unwrap(), 3);
    }

    #[test]
    fn shell_runner_reports_signal_as_negative() {
        assert_eq!(runner().run("kill -9 $$").unwrap(), -9);
    }

    #[test]
    fn shell_runner_redirects_output_to_shared_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let file = File::create(&path).unwrap();
        let r = runner().with_output(file);
        r.run("echo first").unwrap();
        r.run("echo second >&2").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn shell_runner_uses_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let r = runner().with_directory(dir.path());
        assert_eq!(r.run("touch marker").unwrap(), 0);
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn missing_shell_is_an_io_error() {
        let cfg = MparallelConfig {
            shell: "/nonexistent/shell".to_string(),
            ..MparallelConfig::default()
        };
        assert!(ShellRunner::new(&cfg).run("true").is_err());
    }

    #[test]
    fn closures_are_runners() {
        let r = |cmd: &str| Ok::<i32, io::Error>(cmd.len() as i32);
        assert_eq!(CommandRunner::run(&r, "abcd").unwrap(), 4);
    }
}
