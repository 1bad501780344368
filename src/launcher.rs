//! Startup sequence: guard, resolve, supervise

use std::path::Path;

use crate::config;
use crate::error::LauncherResult;
use crate::guard::{self, RuntimeContext};
use crate::model::DetectModel;
use crate::resolver::{self, DisableFlagPolicy, EffectiveConfig};
use crate::settings::{self, Settings};
use crate::supervisor::{Invocation, Replace, Supervisor, SupervisorState};
use crate::worker::Worker;

/// Loader for the persisted settings mapping
pub trait LoadSettings {
    fn load(&self, path: &Path) -> LauncherResult<Settings>;
}

/// Reads the JSON settings file from disk
pub struct FileSettings;

impl LoadSettings for FileSettings {
    fn load(&self, path: &Path) -> LauncherResult<Settings> {
        settings::load_config(path)
    }
}

impl<F> LoadSettings for F
where
    F: Fn(&Path) -> LauncherResult<Settings>,
{
    fn load(&self, path: &Path) -> LauncherResult<Settings> {
        self(path)
    }
}

/// Per-run options taken from the command line
#[derive(Debug, Clone)]
pub struct LaunchOptions<'a> {
    pub model: Option<&'a str>,
    pub settings_path: &'a Path,
    pub disable_policy: DisableFlagPolicy,
}

impl Default for LaunchOptions<'_> {
    fn default() -> Self {
        Self {
            model: None,
            settings_path: Path::new(config::paths::SETTINGS_PATH),
            disable_policy: DisableFlagPolicy::Strict,
        }
    }
}

/// The launcher's collaborators
pub struct Launcher<'a> {
    pub detector: &'a dyn DetectModel,
    pub settings: &'a dyn LoadSettings,
    pub worker: &'a mut dyn Worker,
    pub replacer: &'a mut dyn Replace,
}

impl Launcher<'_> {
    /// Validate the environment and resolve the effective configuration.
    /// Nothing is loaded or detected when the guard fails.
    pub fn prepare(
        &self,
        ctx: &RuntimeContext,
        options: &LaunchOptions<'_>,
    ) -> LauncherResult<EffectiveConfig> {
        guard::check(ctx)?;
        let settings = self.settings.load(options.settings_path)?;
        Ok(resolver::resolve(
            options.model,
            self.detector,
            &settings,
            options.disable_policy,
        ))
    }

    /// Full startup: precondition errors are returned, worker failures are
    /// absorbed by the supervisor.
    pub fn run(
        &mut self,
        ctx: &RuntimeContext,
        options: &LaunchOptions<'_>,
        invocation: &Invocation,
    ) -> LauncherResult<SupervisorState> {
        let effective = self.prepare(ctx, options)?;
        if effective.disabled {
            return Ok(SupervisorState::StoppedDisabled);
        }

        self.worker.prepare()?;
        let mut supervisor = Supervisor::new(&mut *self.worker, &mut *self.replacer, invocation);
        Ok(supervisor.run(&effective.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LauncherError;
    use std::cell::Cell;
    use std::ffi::OsString;
    use std::io;

    #[derive(Default)]
    struct RecordingReplacer {
        calls: Vec<Vec<OsString>>,
    }

    impl Replace for RecordingReplacer {
        fn replace(&mut self, invocation: &Invocation) -> io::Result<()> {
            self.calls.push(invocation.args().to_vec());
            Ok(())
        }
    }

    fn session(euid: u32) -> RuntimeContext {
        RuntimeContext::new(euid, Some("ubuntu:GNOME".into()), Some("x11".into()))
    }

    fn invocation() -> Invocation {
        Invocation::new(
            "/usr/bin/system76-hidpi-launcher",
            vec!["system76-hidpi-launcher".into()],
        )
    }

    fn with_disable(value: &'static str) -> impl Fn(&Path) -> LauncherResult<Settings> {
        move |_: &Path| Ok([("disable-hidpi", value)].into_iter().collect())
    }

    #[test]
    fn detected_model_reaches_worker() {
        let detector = || "oryp5".to_string();
        let settings = |_: &Path| -> LauncherResult<Settings> { Ok(Settings::default()) };
        let mut models = Vec::new();
        let mut worker = |model: &str| -> anyhow::Result<()> {
            models.push(model.to_string());
            Ok(())
        };
        let mut replacer = RecordingReplacer::default();
        let options = LaunchOptions {
            settings_path: Path::new("/etc/system76-daemon.json"),
            ..Default::default()
        };

        let mut launcher = Launcher {
            detector: &detector,
            settings: &settings,
            worker: &mut worker,
            replacer: &mut replacer,
        };
        let effective = launcher.prepare(&session(1000), &options).unwrap();
        assert_eq!(
            effective,
            EffectiveConfig {
                model: "oryp5".into(),
                disabled: false
            }
        );
        let state = launcher.run(&session(1000), &options, &invocation()).unwrap();
        assert_eq!(state, SupervisorState::StoppedOk);
        drop(launcher);
        assert_eq!(models, vec!["oryp5"]);
        assert!(replacer.calls.is_empty());
    }

    #[test]
    fn root_fails_before_settings_or_detection() {
        let detected = Cell::new(false);
        let loaded = Cell::new(false);
        let detector = || {
            detected.set(true);
            "oryp5".to_string()
        };
        let settings = |_: &Path| -> LauncherResult<Settings> {
            loaded.set(true);
            Ok(Settings::default())
        };
        let mut worker = |_: &str| -> anyhow::Result<()> { panic!("worker must not run") };
        let mut replacer = RecordingReplacer::default();
        let options = LaunchOptions::default();

        let err = Launcher {
            detector: &detector,
            settings: &settings,
            worker: &mut worker,
            replacer: &mut replacer,
        }
        .run(&session(0), &options, &invocation())
        .unwrap_err();

        assert!(matches!(err, LauncherError::PermissionError(_)));
        assert!(!detected.get());
        assert!(!loaded.get());
    }

    #[test]
    fn exact_true_never_invokes_worker() {
        let detector = || "oryp5".to_string();
        let settings = with_disable("True");
        let mut worker = |_: &str| -> anyhow::Result<()> { panic!("worker must not run") };
        let mut replacer = RecordingReplacer::default();

        let state = Launcher {
            detector: &detector,
            settings: &settings,
            worker: &mut worker,
            replacer: &mut replacer,
        }
        .run(&session(1000), &LaunchOptions::default(), &invocation())
        .unwrap();
        assert_eq!(state, SupervisorState::StoppedDisabled);
    }

    #[test]
    fn lowercase_true_still_invokes_worker() {
        let detector = || "oryp5".to_string();
        let settings = with_disable("true");
        let mut runs = 0;
        let mut worker = |_: &str| -> anyhow::Result<()> {
            runs += 1;
            Ok(())
        };
        let mut replacer = RecordingReplacer::default();

        let state = Launcher {
            detector: &detector,
            settings: &settings,
            worker: &mut worker,
            replacer: &mut replacer,
        }
        .run(&session(1000), &LaunchOptions::default(), &invocation())
        .unwrap();
        assert_eq!(state, SupervisorState::StoppedOk);
        assert_eq!(runs, 1);
    }

    #[test]
    fn override_model_and_restart_on_failure() {
        let detector = || -> String { panic!("detection must not run") };
        let settings = |_: &Path| -> LauncherResult<Settings> { Ok(Settings::default()) };
        let mut models = Vec::new();
        let mut worker = |model: &str| -> anyhow::Result<()> {
            models.push(model.to_string());
            anyhow::bail!("lost connection to X server")
        };
        let mut replacer = RecordingReplacer::default();
        let options = LaunchOptions {
            model: Some("galp3-b"),
            ..Default::default()
        };
        let invocation = Invocation::new(
            "/usr/bin/system76-hidpi-launcher",
            vec!["system76-hidpi-launcher".into(), "--model".into(), "galp3-b".into()],
        );

        let state = Launcher {
            detector: &detector,
            settings: &settings,
            worker: &mut worker,
            replacer: &mut replacer,
        }
        .run(&session(1000), &options, &invocation)
        .unwrap();

        assert_eq!(state, SupervisorState::Restarting);
        assert_eq!(models, vec!["galp3-b"]);
        assert_eq!(replacer.calls, vec![invocation.args().to_vec()]);
    }

    #[test]
    fn worker_prepare_failure_is_fatal() {
        let detector = || "oryp5".to_string();
        let settings = |_: &Path| -> LauncherResult<Settings> { Ok(Settings::default()) };
        let mut worker = crate::worker::CommandWorker::new("/nonexistent/hidpi-worker");
        let mut replacer = RecordingReplacer::default();

        let err = Launcher {
            detector: &detector,
            settings: &settings,
            worker: &mut worker,
            replacer: &mut replacer,
        }
        .run(&session(1000), &LaunchOptions::default(), &invocation())
        .unwrap_err();
        assert!(err.is_precondition());
        assert!(replacer.calls.is_empty());
    }
}
