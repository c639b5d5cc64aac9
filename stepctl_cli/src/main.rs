use std::fs;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;

use stepctl_config::{Config, Logging};

mod cli;
mod error_fmt;
mod script;

use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};

fn main() {
    let _ = color_eyre::install();
    let args = Cli::parse();
    let _ = JSON_MODE.set(args.json);

    if let Err(err) = run(args) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(error_fmt::exit_code_for_error(&err));
    }
}

fn run(args: Cli) -> eyre::Result<()> {
    let cfg = load_config(&args.config)?;
    init_logging(&args, &cfg.logging);

    match &args.cmd {
        Commands::Check => check(&cfg, args.json),
        Commands::Run { ops } => script::run_script(&cfg, ops, args.json),
    }
}

/// Load the config file; a missing file means built-in defaults.
fn load_config(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&content).wrap_err("failed to parse config TOML")?;
    cfg.validate()?;
    Ok(cfg)
}

fn init_logging(args: &Cli, logging: &Logging) {
    let level = logging.level.as_deref().unwrap_or(&args.log_level);
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map_or_else(|| "stepctl.log".into(), std::ffi::OsStr::to_os_string);
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            // Log files are always JSON lines; the console flag only shapes
            // stdout/stderr output.
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .json()
                .init();
        }
        None => {
            if args.json {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .json()
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

/// Print the effective configuration after validation.
fn check(cfg: &Config, json: bool) -> eyre::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "limits": { "min": cfg.limits.min, "max": cfg.limits.max },
                "stepping": {
                    "step": cfg.stepping.step,
                    "repeat_interval_ms": cfg.stepping.repeat_interval_ms,
                    "initial": cfg.stepping.initial,
                },
                "display": { "min_fraction_digits": cfg.display.min_fraction_digits },
            })
        );
    } else {
        let side = |v: Option<f64>| v.map_or_else(|| "unbounded".to_string(), |v| v.to_string());
        println!("limits: {} .. {}", side(cfg.limits.min), side(cfg.limits.max));
        println!("step: {}", cfg.stepping.step);
        println!("repeat interval: {} ms", cfg.stepping.repeat_interval_ms);
        println!(
            "initial: {}",
            cfg.stepping
                .initial
                .map_or_else(|| "min limit (or 0)".to_string(), |v| v.to_string())
        );
        println!("min fraction digits: {}", cfg.display.min_fraction_digits);
    }
    Ok(())
}
