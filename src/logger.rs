//! Logging initialisation via tracing-subscriber.
//!
//! `RUST_LOG` takes precedence when it is set and parses; otherwise the
//! configured `log_level` is used. Both accept full `EnvFilter` directive
//! strings, not just level names: `"info"` and
//! `"warn,supabase_bootstrap=debug"` are equally valid.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber, writing to stderr.
pub fn init(directives: &str) -> Result<(), AppError> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(directives, from_env.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Pick the filter: `env_directives` if present and valid, else `directives`.
///
/// A malformed `RUST_LOG` is ignored rather than fatal; a malformed
/// configured value is an error.
pub fn build_filter(directives: &str, env_directives: Option<&str>) -> Result<EnvFilter, AppError> {
    if let Some(env) = env_directives.filter(|s| !s.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(env) {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(directives)
        .map_err(|e| AppError::Logger(format!("invalid log filter '{directives}': {e}")))
}
