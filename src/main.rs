//! Runguard - Test-Run Supervisor CLI
//!
//! Supervises a test run: a driver reports pass/fail outcomes while a
//! watchdog ticks once per second, and the process exits with the run's
//! verdict - 0 for a clean run, the failure count for a completed run with
//! failures, 255 for a timeout.
//!
//! ## Usage
//!
//! ```bash
//! # Three checks, all passing, within the default 5 second timeout
//! runguard run --expect 3 --script "ok,ok,ok"
//!
//! # One failure -> exit code 1
//! runguard run --expect 3 --script "ok,fail,ok"
//!
//! # Only two of five checks ever report -> exit code 255 after the timeout
//! runguard run --expect 5 --timeout 5 --script "ok,ok"
//!
//! # Manage configuration
//! runguard config init
//! runguard config set app.default_timeout_secs 10
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::info;

use runguard::cli::{self, Args, Command};
use runguard::config::{env::print_env_help, AppConfig, ConfigFile, EnvConfig};
use runguard::driver::ScriptedDriver;
use runguard::output::{OutputFormat, VerdictFormatter};
use runguard::supervisor::Supervisor;
use runguard::utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Run(run_args) => {
            let exit_code = run_supervised(run_args, args.verbose).await?;
            // The one and only process-terminating call; everything below
            // main returns verdicts instead of exiting.
            std::process::exit(exit_code);
        }
        Command::Config(config_args) => {
            init_logger(LogLevel::from_flags(false, false, args.verbose));
            manage_config(config_args)?;
        }
    }

    Ok(())
}

/// Resolve configuration, run the scripted driver under supervision, print
/// the verdict, and return the exit code for `main` to report.
async fn run_supervised(args: cli::RunArgs, verbose: bool) -> Result<i32> {
    let env = EnvConfig::load();

    let config_path = args.config.as_deref().or(env.config_file.as_deref());
    let config_file = match config_path {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default()?,
    };

    // Precedence: CLI flag > environment > config file > default.
    let mut config: AppConfig = config_file.app;
    config.apply_env(&env);
    if args.debug {
        config.debug = true;
    }
    if args.trace {
        config.trace = true;
    }

    init_logger(LogLevel::from_flags(config.trace, config.debug, verbose));

    let expect = args
        .expect
        .or(env.expect)
        .context("--expect is required (or set RUNGUARD_EXPECT)")?;
    let timeout = args.timeout.unwrap_or(config.default_timeout_secs);
    let tick_ms = args.tick_ms.unwrap_or(config.tick_interval_ms);

    let format_name = args
        .format
        .clone()
        .unwrap_or_else(|| config.default_format.clone());
    let format = OutputFormat::from_str(&format_name)
        .with_context(|| format!("Unknown output format: {format_name}"))?;

    let driver = ScriptedDriver::parse(&args.script)
        .with_context(|| format!("Invalid event script: {}", args.script))?;

    info!(
        "Supervising {} expected check(s), {} scripted event(s)",
        expect,
        driver.len()
    );

    let verdict = Supervisor::new(expect)
        .with_timeout(timeout)
        .with_tick_period(Duration::from_millis(tick_ms))
        .run(move |run, cfg| driver.drive(run, cfg), config)
        .await?;

    let formatter = VerdictFormatter::new(format);
    println!("{}", formatter.format_verdict(&verdict));

    Ok(i32::from(verdict.exit_code()))
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    use std::path::Path;

    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            let config = ConfigFile::example();
            config.save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { env, format } => {
            if env {
                let env_config = EnvConfig::load();
                env_config.print_summary();
            } else {
                let config = ConfigFile::load_default()?;
                let output = if format == "json" {
                    serde_json::to_string_pretty(&config)?
                } else {
                    serde_yaml::to_string(&config)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Validate { file } => {
            let path = file.unwrap_or_else(|| {
                ConfigFile::find()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|| "./runguard.yaml".to_string())
            });

            match ConfigFile::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e}");
                    return Err(e);
                }
            }
        }

        cli::ConfigAction::Set { key, value, file } => {
            let path = file.unwrap_or_else(|| "./runguard.yaml".to_string());
            let mut config = if Path::new(&path).exists() {
                ConfigFile::load(&path)?
            } else {
                ConfigFile::default()
            };

            let value_display = value.clone();

            match key.as_str() {
                "app.default_timeout_secs" => config.app.default_timeout_secs = value.parse()?,
                "app.tick_interval_ms" => config.app.tick_interval_ms = value.parse()?,
                "app.default_format" => config.app.default_format = value,
                "app.debug" => config.app.debug = value.parse()?,
                "app.trace" => config.app.trace = value.parse()?,
                _ => {
                    anyhow::bail!("Unknown configuration key: {key}");
                }
            }

            config.validate()?;
            config.save(&path)?;
            println!("✓ Set {key} = {value_display} in {path}");
        }

        cli::ConfigAction::Get { key, file } => {
            let config = if let Some(path) = file {
                ConfigFile::load(&path)?
            } else {
                ConfigFile::load_default()?
            };

            let value = match key.as_str() {
                "app.default_timeout_secs" => config.app.default_timeout_secs.to_string(),
                "app.tick_interval_ms" => config.app.tick_interval_ms.to_string(),
                "app.default_format" => config.app.default_format.clone(),
                "app.debug" => config.app.debug.to_string(),
                "app.trace" => config.app.trace.to_string(),
                _ => {
                    anyhow::bail!("Unknown configuration key: {key}");
                }
            };

            println!("{value}");
        }

        cli::ConfigAction::Env => {
            print_env_help();
        }
    }

    Ok(())
}
