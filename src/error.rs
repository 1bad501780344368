//! Custom error types for the HiDPI launcher

use std::fmt;
use std::io;

/// Custom error types for launcher operations
#[derive(Debug)]
pub enum LauncherError {
    /// IO-related errors with context
    Io(io::Error, String),

    /// Running with superuser privileges
    PermissionError(String),

    /// Unsupported desktop session
    DesktopError(String),

    /// Unsupported display protocol
    SessionTypeError(String),

    /// Worker executable could not be located
    WorkerMissing(String),
}

impl fmt::Display for LauncherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LauncherError::Io(err, context) => write!(f, "IO Error: {} - {}", context, err),
            LauncherError::PermissionError(msg) => write!(f, "Permission error: {}", msg),
            LauncherError::DesktopError(msg) => write!(f, "Desktop error: {}", msg),
            LauncherError::SessionTypeError(msg) => write!(f, "Session type error: {}", msg),
            LauncherError::WorkerMissing(msg) => write!(f, "Worker not found: {}", msg),
        }
    }
}

impl std::error::Error for LauncherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LauncherError::Io(err, _) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type LauncherResult<T> = Result<T, LauncherError>;

/// Helper trait for converting IO errors with context
pub trait IoResultExt<T> {
    fn with_context(self, context: impl Into<String>) -> LauncherResult<T>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn with_context(self, context: impl Into<String>) -> LauncherResult<T> {
        self.map_err(|e| LauncherError::Io(e, context.into()))
    }
}

/// Error creation helpers
impl LauncherError {
    pub fn permission_error(msg: impl Into<String>) -> Self {
        LauncherError::PermissionError(msg.into())
    }

    pub fn desktop_error(msg: impl Into<String>) -> Self {
        LauncherError::DesktopError(msg.into())
    }

    pub fn session_type_error(msg: impl Into<String>) -> Self {
        LauncherError::SessionTypeError(msg.into())
    }

    pub fn worker_missing(msg: impl Into<String>) -> Self {
        LauncherError::WorkerMissing(msg.into())
    }

    /// Whether this error is a startup precondition failure. These are fatal
    /// and never retried.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            LauncherError::PermissionError(_)
                | LauncherError::DesktopError(_)
                | LauncherError::SessionTypeError(_)
                | LauncherError::WorkerMissing(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_context_is_kept_in_message() {
        let result: Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result.with_context("reading /etc/system76-daemon.json").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("reading /etc/system76-daemon.json"));
        assert!(msg.contains("denied"));
        assert!(!err.is_precondition());
    }

    #[test]
    fn guard_failures_are_preconditions() {
        assert!(LauncherError::permission_error("root").is_precondition());
        assert!(LauncherError::desktop_error("kde").is_precondition());
        assert!(LauncherError::session_type_error("wayland").is_precondition());
        assert!(LauncherError::worker_missing("gone").is_precondition());
    }
}
