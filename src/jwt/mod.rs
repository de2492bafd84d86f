//! The token verification pipeline: base64url decoding, structural parsing,
//! claims validation and RS256 signature verification.

mod base64url;
mod claims;
mod error;
mod parser;
mod signature;

pub use error::*;
pub use parser::*;

pub use claims::validate as validate_claims;
pub use signature::{import_key, verify as verify_signature};
