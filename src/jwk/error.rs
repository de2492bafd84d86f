use thiserror::Error;

/// Errors raised while fetching or decoding the provider's public keys.
#[derive(Debug, Error)]
pub enum PublicKeysError {
    /// The JWK endpoint could not be reached.
    #[error("failed to fetch public keys from the identity provider: {0}")]
    FetchPublicKeys(#[from] reqwest::Error),

    /// The JWK endpoint answered with a non-success status.
    #[error("identity provider returned HTTP {0} for the JWK endpoint")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The response body is not a valid JWK set.
    #[error("failed to parse one or more public keys: {0}")]
    PublicKeyParse(#[from] serde_json::Error),

    /// Reading or replacing the cached key set failed.
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}
