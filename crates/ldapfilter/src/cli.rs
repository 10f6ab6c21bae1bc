//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the ldapfilter CLI.

use clap::{Parser, Subcommand, ValueEnum};

/// ldapfilter - Parse, build and combine LDAP search filters
#[derive(Parser, Debug)]
#[command(name = "ldapfilter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a filter string and print its canonical form
    #[command(alias = "p")]
    Parse {
        /// Filter string, e.g. "(&(uid=jdoe)(mail=*))" or "uid=jdoe"
        filter: String,

        /// Print the component tree instead of the string
        #[arg(long)]
        tree: bool,

        /// Do not AND the configured base filter onto the result
        #[arg(long)]
        no_base: bool,
    },

    /// Build a filter from a JSON symbolic literal
    #[command(alias = "x")]
    Expr {
        /// JSON literal, e.g. '[":and", [":uid", "jdoe"], [":cn", "John"]]'
        literal: String,

        /// Print the component tree instead of the string
        #[arg(long)]
        tree: bool,
    },

    /// Join filters with AND, dropping match-anything operands
    And {
        /// Filters to combine, in order
        #[arg(required = true)]
        filters: Vec<String>,
    },

    /// Build a single comparison from an attribute and a value
    Item {
        /// Attribute description
        attribute: String,

        /// Assertion value
        value: String,

        /// Comparison operator
        #[arg(short = 't', long = "type", value_enum, default_value = "equal")]
        filter_type: ItemType,

        /// Escape RFC4515 special characters in the value
        #[arg(short, long)]
        escape: bool,
    },

    /// Extract attribute/value pairs from a relative distinguished name
    Rdn {
        /// RDN, e.g. "cn=Barbara Jensen+uid=bjensen"
        rdn: String,

        /// Print the filter matching the RDN instead of the pairs
        #[arg(long)]
        filter: bool,
    },

    /// Escape an assertion value
    Escape {
        /// Raw value
        value: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a default config file if none exists
    Init,
}

/// Comparison operators accepted by `item`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemType {
    /// attr=value
    Equal,
    /// attr~=value
    Approx,
    /// attr>=value
    Greater,
    /// attr<=value
    Less,
}

/// Supported shells for completion generation
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
