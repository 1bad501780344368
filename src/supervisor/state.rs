//! Supervisor states and restart bookkeeping

use std::fmt;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Running,
    /// A replacement took over; this process should exit
    Restarting,
    StoppedOk,
    StoppedExhausted,
    /// Disabled by configuration, the worker never ran
    StoppedDisabled,
}

impl SupervisorState {
    pub fn is_terminal(self) -> bool {
        self != SupervisorState::Running
    }

    /// Process exit status for a final state
    pub fn exit_code(self) -> i32 {
        match self {
            SupervisorState::StoppedExhausted => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupervisorState::Running => "RUNNING",
            SupervisorState::Restarting => "RESTARTING",
            SupervisorState::StoppedOk => "STOPPED_OK",
            SupervisorState::StoppedExhausted => "STOPPED_EXHAUSTED",
            SupervisorState::StoppedDisabled => "STOPPED_DISABLED",
        };
        f.write_str(name)
    }
}

/// Restart counter with a fixed bound. `restart_count` never exceeds `bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisionState {
    restart_count: u32,
    bound: u32,
}

impl SupervisionState {
    pub fn new(bound: u32) -> Self {
        Self {
            restart_count: 0,
            bound,
        }
    }

    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }

    pub fn bound(&self) -> u32 {
        self.bound
    }

    pub fn is_exhausted(&self) -> bool {
        self.restart_count >= self.bound
    }

    /// Record one abnormal worker exit. Saturates at the bound.
    pub fn record_restart(&mut self) {
        if !self.is_exhausted() {
            self.restart_count += 1;
        }
    }
}

impl Default for SupervisionState {
    fn default() -> Self {
        Self::new(config::supervisor::RESTART_BOUND)
    }
}
