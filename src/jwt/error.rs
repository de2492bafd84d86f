use thiserror::Error;

pub(crate) type VerificationResult<T> = std::result::Result<T, VerificationError>;

/// Errors that can occur while verifying a Firebase ID token.
///
/// Every failure is terminal for the current verification attempt and carries
/// the specific reason; callers decide how much of it to expose to clients.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The token does not consist of exactly three dot-separated segments.
    #[error("token must consist of exactly three dot-separated segments")]
    InvalidFormat,

    /// The header segment failed base64url, UTF-8 or JSON decoding.
    #[error("could not decode token header: {0}")]
    HeaderDecode(#[source] SegmentDecodeError),

    /// The payload segment failed base64url, UTF-8 or JSON decoding.
    #[error("could not decode token payload: {0}")]
    PayloadDecode(#[source] SegmentDecodeError),

    /// The signature segment is not valid base64url.
    #[error("could not decode token signature: {0}")]
    SignatureDecode(#[source] base64::DecodeError),

    /// The header lacks a non-empty `alg` or `kid`.
    #[error("token header is missing 'alg' or 'kid'")]
    MissingHeaderFields,

    /// The header names an algorithm other than RS256.
    #[error("unsupported algorithm '{0}', only RS256 is accepted")]
    UnsupportedAlgorithm(String),

    /// No key in the provider's JWK set matches the token's `kid`. Seen on
    /// provider key rotation; treated as a hard failure, not retried.
    #[error("no public key found for kid '{0}'")]
    KeyNotFound(String),

    /// The selected JWK could not be imported as an RSA public key.
    #[error("could not import public key: {0}")]
    KeyImport(#[source] jsonwebtoken::errors::Error),

    /// The signature does not match the signed content.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// `exp` is missing or not in the future.
    #[error("token has expired")]
    Expired,

    /// `iat` is missing or in the future.
    #[error("token was issued in the future")]
    IssuedInFuture,

    /// `aud` does not equal the expected project id.
    #[error("invalid audience: expected '{expected}', got '{actual}'")]
    InvalidAudience {
        /// The configured project id.
        expected: String,
        /// The `aud` claim found in the token, or empty if absent.
        actual: String,
    },

    /// `iss` does not equal the secure-token issuer for the project.
    #[error("invalid issuer: expected '{expected}', got '{actual}'")]
    InvalidIssuer {
        /// The issuer derived from the configured project id.
        expected: String,
        /// The `iss` claim found in the token, or empty if absent.
        actual: String,
    },

    /// `sub` is missing or empty.
    #[error("token subject is missing or empty")]
    InvalidSubject,

    /// `auth_time` is missing or in the future.
    #[error("authentication time is in the future")]
    InvalidAuthTime,
}

/// Why a single JWT segment failed to decode.
#[derive(Debug, Error)]
pub enum SegmentDecodeError {
    /// The segment is not valid base64url.
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The decoded text is not the expected JSON shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
