pub mod config;
pub mod exercises;
pub mod run;
pub mod timeline;

use tabata_core::{ConfigError, SessionConfig};

/// Resolve the configuration to inject: the fast debug variant, or the
/// user's config file with the standard protocol as fallback.
pub(crate) fn active_config(debug: bool) -> Result<SessionConfig, ConfigError> {
    if debug {
        Ok(SessionConfig::debug())
    } else {
        SessionConfig::load_or_default()
    }
}
