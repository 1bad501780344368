//! The scaling-compensation worker as seen by the supervisor

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

use crate::error::{LauncherError, LauncherResult};

/// A long-running worker. `run` blocks until the worker stops and returns an
/// error on any abnormal termination.
pub trait Worker {
    /// Called once before the first `run`. Failures are fatal.
    fn prepare(&mut self) -> LauncherResult<()> {
        Ok(())
    }

    fn run(&mut self, model: &str) -> anyhow::Result<()>;
}

impl<F> Worker for F
where
    F: FnMut(&str) -> anyhow::Result<()>,
{
    fn run(&mut self, model: &str) -> anyhow::Result<()> {
        self(model)
    }
}

/// Runs an external worker executable: `<worker> --model <model> [--debug]`
pub struct CommandWorker {
    program: PathBuf,
    debug: bool,
}

impl CommandWorker {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Worker for CommandWorker {
    fn prepare(&mut self) -> LauncherResult<()> {
        let resolved = which::which(&self.program).map_err(|e| {
            LauncherError::worker_missing(format!("{}: {}", self.program.display(), e))
        })?;
        log::debug!("Worker executable: {}", resolved.display());
        self.program = resolved;
        Ok(())
    }

    fn run(&mut self, model: &str) -> anyhow::Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--model").arg(model);
        if self.debug {
            cmd.arg("--debug");
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        if !status.success() {
            bail!("{} exited with {}", self.program.display(), status);
        }
        Ok(())
    }
}
