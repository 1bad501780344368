use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use hidpi_launcher::config;
use hidpi_launcher::guard::{self, RuntimeContext};
use hidpi_launcher::model::DmiDetector;
use hidpi_launcher::resolver::{self, DisableFlagPolicy, EffectiveConfig};
use hidpi_launcher::settings;
use hidpi_launcher::utils;

/// Report what system76-hidpi-launcher would do in this session, without starting the worker
#[derive(Parser, Debug)]
#[command(name = "hidpi-probe", version)]
struct Args {
    /// Model override, as passed to the launcher
    #[arg(long)]
    model: Option<String>,

    /// Settings file
    #[arg(long, default_value = config::paths::SETTINGS_PATH)]
    config: PathBuf,

    /// Apply the lenient disable-flag interpretation
    #[arg(long)]
    lenient_disable_flag: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    euid: u32,
    desktop_session: Option<&'a str>,
    session_type: Option<&'a str>,
    guard: Result<(), String>,
    effective: Option<EffectiveConfig>,
}

fn main() {
    let args = Args::parse();
    utils::init_logging(args.debug);

    let ctx = RuntimeContext::capture();
    let verdict = guard::check(&ctx).map_err(|e| e.to_string());

    // Resolution is reported even when the guard fails
    let effective = match settings::load_config(&args.config) {
        Ok(settings) => {
            let policy = if args.lenient_disable_flag {
                DisableFlagPolicy::Lenient
            } else {
                DisableFlagPolicy::Strict
            };
            Some(resolver::resolve(
                args.model.as_deref(),
                &DmiDetector::new(),
                &settings,
                policy,
            ))
        }
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            None
        }
    };

    let report = Report {
        euid: ctx.euid(),
        desktop_session: ctx.desktop_session(),
        session_type: ctx.session_type(),
        guard: verdict,
        effective,
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("Effective uid: {}", report.euid);
        println!("Desktop session: {}", report.desktop_session.unwrap_or("<unset>"));
        println!("Session type: {}", report.session_type.unwrap_or("<unset>"));
        match &report.guard {
            Ok(()) => println!("Environment: OK"),
            Err(e) => println!("Environment: {}", e),
        }
        if let Some(effective) = &report.effective {
            println!("Model: {}", effective.model);
            println!("Disabled: {}", effective.disabled);
        }
    }

    if report.guard.is_err() {
        std::process::exit(1);
    }
}
