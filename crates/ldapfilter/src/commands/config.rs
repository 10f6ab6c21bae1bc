//! Config command implementation.
//!
//! View and create configuration settings.
//! Config file is located at ~/.config/ldapfilter/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use ldap_filter_rs::Filter;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "LDAPFILTER_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# ldapfilter - LDAP search filter tool configuration

# Config schema version (do not modify)
version = 1

# Filter AND-ed onto every parsed filter (omit to leave filters untouched)
# base_filter = "(objectClass=person)"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)
# json = false              # Always print JSON
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Filter joined with AND onto parsed filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_filter: Option<Filter>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            base_filter: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Always print JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Gets the config file path.
///
/// Resolution order: `LDAPFILTER_CONFIG`, then `$XDG_CONFIG_HOME/ldapfilter`,
/// then `~/.config/ldapfilter`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config)
            .join("ldapfilter")
            .join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| {
            dirs.home_dir()
                .join(".config")
                .join("ldapfilter")
                .join("config.toml")
        })
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk, or defaults when no file exists.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    log::debug!("loaded config from {}", path.display());
    check_version(config)
}

/// Rejects config files written for a newer schema than this build reads.
fn check_version(config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            match config.base_filter {
                Some(ref filter) => println!("  base_filter: {}", filter),
                None => println!("  base_filter: (none)"),
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
            if let Some(json) = config.output.json {
                println!("  json: {}", json);
            }
        } else {
            println!("(No config file exists. Run 'ldapfilter config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let created = !path.exists();

    if created {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CommandError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;
    }

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if created { "created" } else { "exists" },
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if created {
            println!("Created default config at: {}", path.display());
        } else {
            println!("Config already exists at: {}", path.display());
        }
    }

    Ok(())
}
