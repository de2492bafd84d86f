use tracing::debug;

use super::error::PublicKeysError;
use super::key::{CachedKeySet, JwkKey, KeyResponse};
use crate::clock;
use crate::store::AuthStore;

/// Key lifetime applied when the provider response carries no usable
/// `max-age` directive.
pub(crate) const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Store-backed single-slot cache of the provider's JWK set.
///
/// Freshness is decided per verification from the persisted `expires_at`.
/// Concurrent refreshes are unguarded and last-writer-wins; keys are public
/// and idempotent to refetch, so a race only costs a redundant network call.
pub struct KeyCache {
    jwk_url: String,
    http: reqwest::Client,
}

impl KeyCache {
    /// Creates a cache fetching from `jwk_url` with the given HTTP client.
    pub fn new(jwk_url: impl Into<String>, http: reqwest::Client) -> KeyCache {
        KeyCache {
            jwk_url: jwk_url.into(),
            http,
        }
    }

    /// Returns the cached key set, fetching from the provider first when the
    /// cached snapshot is absent or past its expiry.
    pub async fn get_or_refresh(
        &self,
        store: &dyn AuthStore,
    ) -> Result<Vec<JwkKey>, PublicKeysError> {
        let now = clock::now_millis();

        if let Some(cached) = store.key_cache().await? {
            if cached.expires_at >= now {
                let response: KeyResponse = serde_json::from_str(&cached.keys_json)?;
                return Ok(response.keys);
            }
        }

        self.refresh(store, now).await
    }

    async fn refresh(
        &self,
        store: &dyn AuthStore,
        now: i64,
    ) -> Result<Vec<JwkKey>, PublicKeysError> {
        let response = self.http.get(&self.jwk_url).send().await?;
        if !response.status().is_success() {
            return Err(PublicKeysError::UnexpectedStatus(response.status()));
        }

        let max_age = response
            .headers()
            .get("Cache-Control")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_MAX_AGE_SECS);

        let body = response.text().await?;
        let parsed: KeyResponse = serde_json::from_str(&body)?;

        store
            .put_key_cache(CachedKeySet {
                keys_json: body,
                fetched_at: now,
                expires_at: now + (max_age as i64) * 1000,
            })
            .await?;
        debug!(max_age, "refreshed provider JWK set");

        Ok(parsed.keys)
    }
}

/// Extracts the first `max-age=<digits>` directive from a `Cache-Control`
/// header value. Returns `None` when the directive is absent or not a number.
pub fn parse_max_age(value: &str) -> Option<u64> {
    for directive in value.split(',') {
        let mut parts = directive.trim().splitn(2, '=');
        let key = parts.next().unwrap_or("").trim();
        let val = parts.next().unwrap_or("").trim();

        if key.eq_ignore_ascii_case("max-age") {
            return val.parse::<u64>().ok();
        }
    }

    None
}

/// Linear scan of the key set for the entry matching the token's `kid`.
pub fn select_key<'a>(keys: &'a [JwkKey], kid: &str) -> Option<&'a JwkKey> {
    keys.iter().find(|key| key.kid == kid)
}
