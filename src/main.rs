use clap::Parser;

use hidpi_launcher::cli::{Cli, RestartMode};
use hidpi_launcher::guard::RuntimeContext;
use hidpi_launcher::launcher::{FileSettings, LaunchOptions, Launcher};
use hidpi_launcher::model::DmiDetector;
use hidpi_launcher::resolver::DisableFlagPolicy;
use hidpi_launcher::supervisor::{ExecReplacer, Invocation, Replace, SpawnReplacer};
use hidpi_launcher::utils;
use hidpi_launcher::worker::CommandWorker;

fn main() {
    // Captured before argument parsing so a replacement sees argv untouched
    let invocation = Invocation::current();
    let ctx = RuntimeContext::capture();
    let cli = Cli::parse();

    utils::init_logging(cli.debug);
    log::info!(
        "Starting system76-hidpi-launcher v{} (pid {})",
        env!("CARGO_PKG_VERSION"),
        std::process::id()
    );

    let options = LaunchOptions {
        model: cli.model.as_deref(),
        settings_path: &cli.config,
        disable_policy: if cli.lenient_disable_flag {
            DisableFlagPolicy::Lenient
        } else {
            DisableFlagPolicy::Strict
        },
    };

    let detector = DmiDetector::new();
    let mut worker = CommandWorker::new(&cli.worker).with_debug(cli.debug);
    let mut replacer: Box<dyn Replace> = match cli.restart_mode {
        RestartMode::Exec => Box::new(ExecReplacer),
        RestartMode::Spawn => Box::new(SpawnReplacer),
    };

    let mut launcher = Launcher {
        detector: &detector,
        settings: &FileSettings,
        worker: &mut worker,
        replacer: replacer.as_mut(),
    };

    match launcher.run(&ctx, &options, &invocation) {
        Ok(state) => {
            log::info!("Exiting in state {} after {:?}", state, ctx.uptime());
            std::process::exit(state.exit_code());
        }
        Err(e) if e.is_precondition() => {
            eprintln!("system76-hidpi-launcher: cannot start: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("system76-hidpi-launcher: {}", e);
            std::process::exit(1);
        }
    }
}
