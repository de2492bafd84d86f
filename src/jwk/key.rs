use serde::{Deserialize, Serialize};

/// Shape of the provider's JWK endpoint response.
#[derive(Debug, Deserialize)]
pub struct KeyResponse {
    /// The published signing keys.
    pub keys: Vec<JwkKey>,
}

/// A single RSA public key from the provider's JWK set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JwkKey {
    /// Public exponent, base64url.
    pub e: String,
    /// Algorithm the key is meant for.
    #[serde(default)]
    pub alg: String,
    /// Key type, `"RSA"` for Firebase keys.
    pub kty: String,
    /// Key id, matched against the token header's `kid`.
    pub kid: String,
    /// Modulus, base64url.
    pub n: String,
}

/// The persisted snapshot of the provider's key set. At most one logical row
/// exists at a time; replacement is a keyed upsert.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedKeySet {
    /// Raw JSON body of the JWK endpoint response.
    pub keys_json: String,
    /// When the snapshot was fetched, epoch milliseconds.
    pub fetched_at: i64,
    /// When the snapshot stops being served without a refetch, epoch
    /// milliseconds.
    pub expires_at: i64,
}
