//! Production configuration validation
//!
//! Security checks for production deployments.

use super::config::AppConfig;
use tracing::warn;

/// Warn about insecure settings when `ARMORY_ENV=production`.
/// Returns the number of warnings emitted.
pub fn validate_production_config(config: &AppConfig) -> usize {
    let is_production = std::env::var("ARMORY_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if !is_production {
        return 0;
    }

    check_config(config)
}

fn check_config(config: &AppConfig) -> usize {
    let mut warnings = 0;

    if config.server.host == "0.0.0.0" {
        warn!(
            "SECURITY WARNING: Server is binding to all interfaces (0.0.0.0) in production. \
             Consider binding to 127.0.0.1 and using a reverse proxy."
        );
        warnings += 1;
    }

    if !config.session.secure_cookie {
        warn!(
            "SECURITY WARNING: Session cookies are sent without the Secure attribute. \
             Set [session] secure_cookie = true when serving over HTTPS."
        );
        warnings += 1;
    }

    warnings
}
