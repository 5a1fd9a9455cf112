use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Optional defaults loaded from `~/.config/mparallel/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MparallelConfig {
    /// Shell used to run each job command.
    pub shell: String,
    /// Argument passed to the shell before the command string.
    pub shell_arg: String,
    /// Default total memory budget when `--max-memory` is not given.
    pub max_memory: Option<u64>,
    /// Default parallelism when `--jobs` is not given.
    pub jobs: Option<usize>,
}

impl Default for MparallelConfig {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            shell_arg: "-c".to_string(),
            max_memory: None,
            jobs: None,
        }
    }
}

/// The two budgets a run is scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Total memory shared by all running jobs, in the job file's units.
    pub max_memory: u64,
    /// Maximum number of jobs running at once.
    pub max_jobs: usize,
}

impl RunLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_jobs < 1 {
            return Err(ConfigError::NoParallelism);
        }
        Ok(())
    }
}

impl MparallelConfig {
    /// Combines command-line values with config defaults; the command line wins.
    pub fn resolve_limits(
        &self,
        max_memory: Option<u64>,
        jobs: Option<usize>,
    ) -> Result<RunLimits, ConfigError> {
        let max_memory = max_memory
            .or(self.max_memory)
            .ok_or(ConfigError::Missing("max-memory"))?;
        let max_jobs = jobs.or(self.jobs).ok_or(ConfigError::Missing("jobs"))?;
        let limits = RunLimits {
            max_memory,
            max_jobs,
        };
        limits.validate()?;
        Ok(limits)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mparallel")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from `path`.
pub fn load_from_path(path: &Path) -> Result<MparallelConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: MparallelConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

/// Load the user config if one exists, otherwise built-in defaults.
pub fn load_or_default() -> Result<MparallelConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(MparallelConfig::default());
    }
    load_from_path(&path)
}
