//! The two environment values the client needs: endpoint URL and anon key.

use std::env;
use std::fmt;

use super::SupabaseError;

/// Environment variable holding the project endpoint URL.
pub const SUPABASE_URL_ENV: &str = "VITE_SUPABASE_URL";

/// Environment variable holding the public (anon) access key.
pub const SUPABASE_KEY_ENV: &str = "VITE_SUPABASE_ANON_KEY";

/// Fixed message reported when either value is absent or empty.
pub const MISSING_CONFIG_MESSAGE: &str = "Supabase URL or Key is missing in environment variables";

/// Endpoint URL and access key, as read at startup. Either may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigPair {
    pub url: Option<String>,
    pub key: Option<String>,
}

impl ConfigPair {
    pub fn new(url: Option<String>, key: Option<String>) -> Self {
        Self { url, key }
    }

    /// Read both values from the process environment.
    /// Unset and non-UTF-8 values both become `None`.
    pub fn from_env() -> Self {
        Self {
            url: env::var(SUPABASE_URL_ENV).ok(),
            key: env::var(SUPABASE_KEY_ENV).ok(),
        }
    }

    /// Borrow `(url, key)` when both are non-empty.
    ///
    /// Absent and empty strings are treated the same. Whitespace is not
    /// trimmed: `" "` counts as present.
    pub fn validate(&self) -> Result<(&str, &str), SupabaseError> {
        match (non_empty(&self.url), non_empty(&self.key)) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(SupabaseError::MissingConfig),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl fmt::Debug for ConfigPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigPair")
            .field("url", &self.url)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
