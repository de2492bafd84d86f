//! The provider's public signing keys: JWK set types, fetching and the
//! store-backed single-slot cache.

mod cache;
mod error;
mod key;

pub use cache::*;
pub use error::*;
pub use key::*;
