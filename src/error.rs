/// A crate-wide result type alias using the custom [`Error`] enum.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for verification and account-management failures.
///
/// Every variant keeps the specific underlying reason; nothing is collapsed
/// into a generic "invalid token" below the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Token verification or claim validation failed.
    #[error(transparent)]
    Verification(#[from] crate::jwt::VerificationError),

    /// Fetching or decoding the provider's public keys failed.
    #[error(transparent)]
    PublicKeys(#[from] crate::jwk::PublicKeysError),

    /// The backing store rejected a read or write.
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    /// An identity REST passthrough call failed.
    #[error(transparent)]
    Identity(#[from] crate::identity::IdentityError),

    /// Required configuration was not supplied.
    #[error("missing configuration: {0}")]
    Config(&'static str),
}
