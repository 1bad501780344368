//! Environment Guard: refuses to start outside a regular-user GNOME/X11 session

use std::time::{Duration, Instant};

use crate::config;
use crate::error::{LauncherError, LauncherResult};
use crate::utils;

/// Snapshot of the process environment taken once at startup
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    euid: u32,
    desktop_session: Option<String>,
    session_type: Option<String>,
    started_at: Instant,
}

impl RuntimeContext {
    pub fn new(euid: u32, desktop_session: Option<String>, session_type: Option<String>) -> Self {
        Self {
            euid,
            desktop_session,
            session_type,
            started_at: Instant::now(),
        }
    }

    /// Capture the effective uid and session variables of the current process
    pub fn capture() -> Self {
        Self::new(
            utils::effective_uid(),
            utils::env_var(config::env::DESKTOP_SESSION_VAR),
            utils::env_var(config::env::SESSION_TYPE_VAR),
        )
    }

    pub fn euid(&self) -> u32 {
        self.euid
    }

    pub fn desktop_session(&self) -> Option<&str> {
        self.desktop_session.as_deref()
    }

    pub fn session_type(&self) -> Option<&str> {
        self.session_type.as_deref()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Validate the runtime context. Rules run in order and the first failure wins.
pub fn check(ctx: &RuntimeContext) -> LauncherResult<()> {
    if ctx.euid() == 0 {
        return Err(LauncherError::permission_error(
            "the HiDPI daemon manages a per-user display session and must not run as root",
        ));
    }

    if !contains(ctx.desktop_session(), config::guard::REQUIRED_DESKTOP) {
        return Err(LauncherError::desktop_error(format!(
            "{} must contain {:?} (found {:?})",
            config::env::DESKTOP_SESSION_VAR,
            config::guard::REQUIRED_DESKTOP,
            ctx.desktop_session().unwrap_or("<unset>")
        )));
    }

    if !contains(ctx.session_type(), config::guard::REQUIRED_SESSION_TYPE) {
        return Err(LauncherError::session_type_error(format!(
            "{} must contain {:?} (found {:?})",
            config::env::SESSION_TYPE_VAR,
            config::guard::REQUIRED_SESSION_TYPE,
            ctx.session_type().unwrap_or("<unset>")
        )));
    }

    Ok(())
}

// Absent variables never match.
fn contains(value: Option<&str>, needle: &str) -> bool {
    value.is_some_and(|v| v.contains(needle))
}
