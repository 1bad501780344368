//! Process replacement: relaunch this program with its original arguments

use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::Command;

/// The original command line of this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    /// Full argv, including argv[0]
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Capture the running executable and argv. Falls back to argv[0] when
    /// the executable path is unavailable.
    pub fn current() -> Self {
        let args: Vec<OsString> = std::env::args_os().collect();
        let program = std::env::current_exe()
            .ok()
            .or_else(|| args.first().map(PathBuf::from))
            .unwrap_or_default();
        Self::new(program, args)
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some((arg0, rest)) = self.args.split_first() {
            cmd.arg0(arg0);
            cmd.args(rest);
        }
        cmd
    }
}

/// Strategy that hands control to a fresh copy of this program.
///
/// `Ok(())` means the replacement has taken over and the caller must stop.
/// `Err` means nothing was replaced.
pub trait Replace {
    fn replace(&mut self, invocation: &Invocation) -> io::Result<()>;
}

/// Replaces the current process image (execve). Only returns on failure.
#[derive(Debug, Default)]
pub struct ExecReplacer;

impl Replace for ExecReplacer {
    fn replace(&mut self, invocation: &Invocation) -> io::Result<()> {
        log::info!("Re-executing {}", invocation.program().display());
        Err(invocation.command().exec())
    }
}

/// Spawns a fresh copy and leaves this process to exit
#[derive(Debug, Default)]
pub struct SpawnReplacer;

impl Replace for SpawnReplacer {
    fn replace(&mut self, invocation: &Invocation) -> io::Result<()> {
        let child = invocation.command().spawn()?;
        log::info!(
            "Spawned {} as pid {}",
            invocation.program().display(),
            child.id()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_invocation_keeps_argv() {
        let invocation = Invocation::current();
        let expected: Vec<OsString> = std::env::args_os().collect();
        assert_eq!(invocation.args(), expected.as_slice());
        assert!(!invocation.program().as_os_str().is_empty());
    }

    #[test]
    fn exec_of_missing_program_returns_error() {
        let invocation = Invocation::new(
            "/nonexistent/system76-hidpi-launcher",
            vec!["system76-hidpi-launcher".into()],
        );
        assert!(ExecReplacer.replace(&invocation).is_err());
    }

    #[test]
    fn command_carries_argv_unchanged() {
        // The shell prints its positional arguments, then its own argv[0]
        // as seen by the kernel.
        let script = r#"printf '%s|' "$0" "$@"; printf '\n'; tr '\000' '\n' < /proc/$$/cmdline | head -n 1"#;
        let invocation = Invocation::new(
            "/bin/sh",
            vec![
                "system76-hidpi-launcher".into(),
                "-c".into(),
                script.into(),
                "a b".into(),
                "--model".into(),
                "oryp5".into(),
            ],
        );

        let output = invocation.command().output().expect("failed to run /bin/sh");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut lines = stdout.lines();
        assert_eq!(lines.next(), Some("a b|--model|oryp5|"));
        assert_eq!(lines.next(), Some("system76-hidpi-launcher"));
    }

    #[test]
    fn spawn_starts_a_fresh_copy() {
        let invocation = Invocation::new("true", vec!["true".into(), "--model".into(), "oryp5".into()]);
        assert!(SpawnReplacer.replace(&invocation).is_ok());
    }
}
