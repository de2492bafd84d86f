use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{Algorithm, DecodingKey};

use super::error::{VerificationError, VerificationResult};
use crate::jwk::JwkKey;

/// Imports a JWK's RSA components as an RS256 verify-only key.
pub fn import_key(jwk: &JwkKey) -> VerificationResult<DecodingKey> {
    DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
        .map_err(VerificationError::KeyImport)
}

/// Returns whether `signature` is a valid RSASSA-PKCS1-v1_5/SHA-256 signature
/// over the UTF-8 bytes of `signed_content`.
///
/// A mismatching signature yields `Ok(false)`, never an error; callers must
/// treat `false` as an invalid token. Errors only surface for inputs the
/// underlying primitive cannot process at all.
pub fn verify(
    signed_content: &str,
    signature: &[u8],
    key: &DecodingKey,
) -> VerificationResult<bool> {
    let signature_b64 = BASE64_URL_SAFE_NO_PAD.encode(signature);
    jsonwebtoken::crypto::verify(
        &signature_b64,
        signed_content.as_bytes(),
        key,
        Algorithm::RS256,
    )
    .map_err(|_| VerificationError::InvalidSignature)
}
