//! Logger setup.

use env_logger::{Builder, Env};

/// Returns the default log level for the verbosity flags.
fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initializes the logger. `RUST_LOG` overrides the flag-derived level.
pub fn init_logger(verbose: bool, quiet: bool) {
    let env = Env::default().default_filter_or(default_level(verbose, quiet));
    if let Err(e) = Builder::from_env(env).format_timestamp(None).try_init() {
        log::debug!("logger already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, true), "error");
        assert_eq!(default_level(false, false), "warn");
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(false, false);
        init_logger(true, false);
        log::debug!("still logging after a repeated init");
    }
}
