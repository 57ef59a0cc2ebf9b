//! Logging setup on top of `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

use crate::spec::PackageError;

/// Environment variable holding a full `EnvFilter` directive; wins over `-v`/`-q`.
pub const C_ENV_LOG: &str = "RETROFE_PACKAGE_LOG";

/// Level implied by the verbosity flags.
pub fn derive_log_level(n_verbose: u8, if_quiet: bool) -> &'static str {
    if if_quiet {
        return "error";
    }
    match n_verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Call once, before any packaging work.
pub fn init_logging(n_verbose: u8, if_quiet: bool) -> Result<(), PackageError> {
    let env_filter = EnvFilter::try_from_env(C_ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(derive_log_level(n_verbose, if_quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| PackageError::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::derive_log_level;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(derive_log_level(0, false), "info");
        assert_eq!(derive_log_level(1, false), "debug");
        assert_eq!(derive_log_level(5, false), "trace");
        assert_eq!(derive_log_level(3, true), "error");
    }
}
