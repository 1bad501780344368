//! Command line definition

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config;

/// How a crashed worker is restarted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RestartMode {
    /// Replace this process image with a fresh copy (execve)
    Exec,
    /// Spawn a fresh copy and exit
    Spawn,
}

/// System76 HiDPI launcher - keeps the scaling daemon running for this session
#[derive(Parser, Debug, Clone)]
#[command(name = "system76-hidpi-launcher", version)]
pub struct Cli {
    /// Override automatic hardware model detection
    #[arg(long)]
    pub model: Option<String>,

    /// Enable debug logging (also forwarded to the worker)
    #[arg(long)]
    pub debug: bool,

    /// Settings file read for the `disable-hidpi` switch
    #[arg(long, default_value = config::paths::SETTINGS_PATH)]
    pub config: PathBuf,

    /// Worker executable
    #[arg(long, env = config::env::WORKER_VAR, default_value = config::paths::DEFAULT_WORKER)]
    pub worker: PathBuf,

    /// Strategy used to restart after a worker failure
    #[arg(long, value_enum, default_value_t = RestartMode::Exec)]
    pub restart_mode: RestartMode,

    /// Also treat "true" as disabling, not only "True"
    #[arg(long)]
    pub lenient_disable_flag: bool,
}
