//! Supabase client bootstrap.
//!
//! [`Supabase`] holds exactly one of a ready [`SupabaseClient`] or the error
//! that prevented building it. [`global`] builds it once from the process
//! environment on first access and hands out the same value afterwards.
//!
//! - **env** — `ConfigPair` and the environment variable names.
//! - **client** — `SupabaseClient` and the `create_client` factory.

pub mod client;
pub mod env;

use std::sync::OnceLock;

use thiserror::Error;
use tracing::{info, warn};

pub use client::{SupabaseClient, create_client};
pub use env::{ConfigPair, MISSING_CONFIG_MESSAGE, SUPABASE_KEY_ENV, SUPABASE_URL_ENV};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupabaseError {
    #[error("{}", MISSING_CONFIG_MESSAGE)]
    MissingConfig,
    #[error("invalid Supabase URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build Supabase client: {0}")]
    Client(String),
    #[error("Supabase request failed: {0}")]
    Request(String),
}

/// Outcome of client initialisation.
#[derive(Debug, Clone)]
pub struct Supabase {
    inner: Result<SupabaseClient, SupabaseError>,
}

impl Supabase {
    /// Validate `pair` and, if both values are present, build the client.
    ///
    /// A URL the factory rejects lands in the error slot the same way a
    /// missing value does; nothing here panics.
    pub fn init(pair: &ConfigPair) -> Self {
        let inner = pair
            .validate()
            .and_then(|(url, key)| create_client(url, key));

        match &inner {
            Ok(client) => info!(base = %client.base_url(), "supabase client ready"),
            Err(e) => warn!(error = %e, "supabase client unavailable"),
        }

        Self { inner }
    }

    pub fn from_env() -> Self {
        Self::init(&ConfigPair::from_env())
    }

    /// The client, when initialisation succeeded.
    pub fn client(&self) -> Option<&SupabaseClient> {
        self.inner.as_ref().ok()
    }

    /// Human-readable reason the client is missing, when it is.
    pub fn config_error(&self) -> Option<String> {
        self.inner.as_ref().err().map(ToString::to_string)
    }

    pub fn error(&self) -> Option<&SupabaseError> {
        self.inner.as_ref().err()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn into_result(self) -> Result<SupabaseClient, SupabaseError> {
        self.inner
    }
}

static GLOBAL: OnceLock<Supabase> = OnceLock::new();

/// Process-wide instance, built from the environment on first call.
/// Later changes to the environment are not observed.
pub fn global() -> &'static Supabase {
    GLOBAL.get_or_init(Supabase::from_env)
}
