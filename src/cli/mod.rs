//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Test-run supervisor with completion tracking and a timeout watchdog
#[derive(Parser, Debug)]
#[command(name = "runguard")]
#[command(author = "hephaex@gmail.com")]
#[command(version = "0.1.0")]
#[command(about = "Supervise a test run and exit with its verdict")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scripted driver under supervision
    Run(RunArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Number of check outcomes the run must observe
    #[arg(short, long)]
    pub expect: Option<u64>,

    /// Run timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Event script, e.g. "ok,fail@250ms,ok@2s"
    #[arg(short, long, default_value = "ok")]
    pub script: String,

    /// Watchdog tick interval in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Output format (text, json, json-pretty)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Enable trace logging (echoes the resolved configuration)
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a configuration file with example settings
    Init {
        /// Output path
        #[arg(short, long, default_value = "./runguard.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the resolved configuration
    Show {
        /// Show environment variable overrides instead
        #[arg(short, long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file (defaults to discovery)
        file: Option<String>,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. app.default_timeout_secs)
        key: String,

        /// Value to set
        value: String,

        /// Path to configuration file
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (e.g. app.default_timeout_secs)
        key: String,

        /// Path to configuration file
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Show environment variable help
    Env,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_parsing() {
        let args = Args::parse_from([
            "runguard",
            "run",
            "--expect",
            "3",
            "--timeout",
            "10",
            "--script",
            "ok,fail,ok",
        ]);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.expect, Some(3));
                assert_eq!(run_args.timeout, Some(10));
                assert_eq!(run_args.script, "ok,fail,ok");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_defaults() {
        let args = Args::parse_from(["runguard", "run", "--expect", "1"]);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.script, "ok");
                assert!(run_args.timeout.is_none());
                assert!(run_args.tick_ms.is_none());
                assert!(!run_args.debug);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_init_parsing() {
        let args = Args::parse_from(["runguard", "config", "init", "--force"]);
        match args.command {
            Command::Config(config_args) => match config_args.action {
                ConfigAction::Init { output, force } => {
                    assert_eq!(output, "./runguard.yaml");
                    assert!(force);
                }
                _ => panic!("Expected Init action"),
            },
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_global_verbose() {
        let args = Args::parse_from(["runguard", "run", "--expect", "1", "--verbose"]);
        assert!(args.verbose);
    }
}
