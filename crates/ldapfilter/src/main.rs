use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{load_config, Config};
use commands::filter::{ItemOptions, ParseOptions};
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    // Config and completions run without loading the config file, so a
    // broken file can still be inspected or replaced.
    match &cli.command {
        Commands::Completions { shell } => {
            return commands::completions::execute(shell).map_err(CommandError::from);
        }
        Commands::Config { command } => {
            let ctx = CommandContext::from_cli(cli, &Config::default());
            return match command.as_ref().unwrap_or(&ConfigCommands::Show) {
                ConfigCommands::Show => commands::config::execute_show(&ctx),
                ConfigCommands::Path => commands::config::execute_path(&ctx),
                ConfigCommands::Init => commands::config::execute_init(&ctx),
            };
        }
        _ => {}
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);

    match &cli.command {
        Commands::Parse {
            filter,
            tree,
            no_base,
        } => commands::filter::execute_parse(
            &ctx,
            &config,
            &ParseOptions {
                filter: filter.clone(),
                tree: *tree,
                no_base: *no_base,
            },
        ),
        Commands::Expr { literal, tree } => commands::filter::execute_expr(&ctx, literal, *tree),
        Commands::And { filters } => commands::filter::execute_and(&ctx, filters),
        Commands::Item {
            attribute,
            value,
            filter_type,
            escape,
        } => commands::filter::execute_item(
            &ctx,
            &ItemOptions {
                attribute: attribute.clone(),
                value: value.clone(),
                filter_type: *filter_type,
                escape: *escape,
            },
        ),
        Commands::Rdn { rdn, filter } => commands::values::execute_rdn(&ctx, rdn, *filter),
        Commands::Escape { value } => commands::values::execute_escape(&ctx, value),
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldap_filter_rs::FilterError;

    #[test]
    fn test_error_codes() {
        let filter_err = CommandError::from(FilterError::EmptyExpression);
        assert_eq!(error_code(&filter_err), "FILTER_ERROR");
        assert_eq!(error_exit_code(&filter_err), ExitCode::from(1));

        let config_err = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config_err), "CONFIG_ERROR");
        assert_eq!(error_exit_code(&config_err), ExitCode::from(5));

        let io_err = CommandError::from(std::io::Error::other("closed"));
        assert_eq!(error_code(&io_err), "IO_ERROR");
        assert_eq!(error_exit_code(&io_err), ExitCode::from(3));
    }
}
