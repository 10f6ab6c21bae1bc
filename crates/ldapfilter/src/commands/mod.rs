//! Command implementations for the ldapfilter CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod filter;
pub mod values;

use std::env;

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing or construction error.
    #[error("filter error: {0}")]
    Filter(#[from] ldap_filter_rs::FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a command context from CLI arguments and the loaded config.
    ///
    /// Flags win over config values; `NO_COLOR` disables colors regardless.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json || config.output.json.unwrap_or(false),
            use_colors: !cli.no_color && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use config::OutputConfig;

    fn cli(json: bool, no_color: bool) -> Cli {
        Cli {
            verbose: false,
            quiet: false,
            json,
            no_color,
            command: Commands::Escape {
                value: "x".to_string(),
            },
        }
    }

    #[test]
    fn test_context_json_from_config() {
        let config = Config {
            output: OutputConfig {
                json: Some(true),
                color: None,
            },
            ..Config::default()
        };
        let ctx = CommandContext::from_cli(&cli(false, false), &config);
        assert!(ctx.json_output);
    }

    #[test]
    fn test_context_no_color_flag_overrides_config() {
        let config = Config {
            output: OutputConfig {
                json: None,
                color: Some(true),
            },
            ..Config::default()
        };
        let ctx = CommandContext::from_cli(&cli(false, true), &config);
        assert!(!ctx.use_colors);
    }

    #[test]
    fn test_error_display() {
        let err = CommandError::from(ldap_filter_rs::FilterError::expression("whatev!"));
        assert_eq!(
            err.to_string(),
            "filter error: unable to parse filter expression 'whatev!'"
        );
    }
}
