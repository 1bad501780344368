//! Supervisor Loop: run the worker, replace the process when it fails

pub mod replace;
pub mod state;

pub use replace::{ExecReplacer, Invocation, Replace, SpawnReplacer};
pub use state::{SupervisionState, SupervisorState};

use crate::worker::Worker;

pub struct Supervisor<'a> {
    worker: &'a mut dyn Worker,
    replacer: &'a mut dyn Replace,
    invocation: &'a Invocation,
    state: SupervisorState,
    supervision: SupervisionState,
}

impl<'a> Supervisor<'a> {
    pub fn new(
        worker: &'a mut dyn Worker,
        replacer: &'a mut dyn Replace,
        invocation: &'a Invocation,
    ) -> Self {
        Self {
            worker,
            replacer,
            invocation,
            state: SupervisorState::Running,
            supervision: SupervisionState::default(),
        }
    }

    pub fn with_bound(mut self, bound: u32) -> Self {
        self.supervision = SupervisionState::new(bound);
        self
    }

    pub fn restart_count(&self) -> u32 {
        self.supervision.restart_count()
    }

    fn transition(&mut self, next: SupervisorState) {
        log::debug!("Supervisor {} -> {}", self.state, next);
        self.state = next;
    }

    /// Run until the worker returns normally, a replacement takes over, or
    /// the restart bound is reached. Returns the final state.
    pub fn run(&mut self, model: &str) -> SupervisorState {
        while !self.state.is_terminal() {
            if self.supervision.is_exhausted() {
                log::error!(
                    "Giving up after {} restarts",
                    self.supervision.restart_count()
                );
                self.transition(SupervisorState::StoppedExhausted);
                break;
            }

            match self.worker.run(model) {
                Ok(()) => {
                    log::info!("Worker finished");
                    self.transition(SupervisorState::StoppedOk);
                }
                Err(e) => {
                    self.supervision.record_restart();
                    log::debug!("Worker error: {:#}", e);
                    log::warn!(
                        "Worker exited abnormally; restarting ({}/{})",
                        self.supervision.restart_count(),
                        self.supervision.bound()
                    );
                    self.transition(SupervisorState::Restarting);
                    match self.replacer.replace(self.invocation) {
                        Ok(()) => break,
                        Err(e) => {
                            log::error!("Process replacement failed: {}; retrying in-process", e);
                            self.transition(SupervisorState::Running);
                        }
                    }
                }
            }
        }
        self.state
    }
}
