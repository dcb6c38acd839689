//! Supabase client handle.
//!
//! Wraps a `reqwest::Client` whose default headers carry the project key the
//! way the JS client does (`apikey` plus a bearer token). Building a handle
//! performs no network I/O; the service endpoints are derived from the base
//! URL on demand.

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use tracing::debug;

use super::SupabaseError;

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Authenticated connection descriptor for one Supabase project.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` internally.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    /// Base URL without a trailing slash.
    base: String,
}

/// Build a client for `url`, authenticating every request with `key`.
///
/// Both arguments are expected to be non-empty already. The URL must parse
/// and use `http` or `https`.
pub fn create_client(url: &str, key: &str) -> Result<SupabaseClient, SupabaseError> {
    let mut parsed = Url::parse(url).map_err(|e| SupabaseError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SupabaseError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(SupabaseError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".into(),
        });
    }

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("apikey"), sensitive_value(key)?);
    headers.insert(AUTHORIZATION, sensitive_value(&format!("Bearer {key}"))?);

    let http = Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| SupabaseError::Client(format!("failed to build HTTP client: {e}")))?;

    // Endpoints are appended to the path; a query or fragment would end up
    // in front of them.
    parsed.set_query(None);
    parsed.set_fragment(None);
    let base = parsed.as_str().trim_end_matches('/').to_string();
    debug!(base = %base, "supabase client constructed");

    Ok(SupabaseClient { http, base })
}

fn sensitive_value(raw: &str) -> Result<HeaderValue, SupabaseError> {
    let mut value = HeaderValue::from_str(raw)
        .map_err(|_| SupabaseError::Client("key contains characters not allowed in a header".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

impl SupabaseClient {
    /// Project base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// PostgREST endpoint.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base)
    }

    /// GoTrue (auth) endpoint.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base)
    }

    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.base)
    }

    pub fn functions_url(&self) -> String {
        format!("{}/functions/v1", self.base)
    }

    /// Realtime websocket endpoint: `http` becomes `ws`, `https` becomes `wss`.
    pub fn realtime_url(&self) -> String {
        format!("{}/realtime/v1", self.base.replacen("http", "ws", 1))
    }

    /// Reachability probe against the auth health endpoint.
    ///
    /// Any HTTP response, including 4xx/5xx, counts as reachable. Only a
    /// transport failure (refused, timeout, DNS) is an error.
    pub async fn ping(&self) -> Result<(), SupabaseError> {
        let url = format!("{}/health", self.auth_url());
        let response = self
            .http
            .get(&url)
            .timeout(PING_TIMEOUT)
            .send()
            .await
            .map_err(|e| SupabaseError::Request(format!("unreachable: {e}")))?;
        debug!(url = %url, status = %response.status(), "supabase ping");
        Ok(())
    }
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
