use std::sync::Arc;

use tracing::debug;

use crate::clock;
use crate::config::FirebaseConfig;
use crate::jwk::{self, KeyCache};
use crate::jwt::{self, VerificationError};
use crate::store::AuthStore;
use crate::user::{UserProfile, UserRecord};

/// Verifies Firebase ID tokens and maintains the local user and session rows
/// derived from verified claims.
///
/// Verification is invoked per request and shares no in-process state; the
/// only cross-request state is the key-cache row in the store.
#[derive(Clone)]
pub struct FirebaseAuth {
    config: FirebaseConfig,
    keys: Arc<KeyCache>,
    store: Arc<dyn AuthStore>,
}

impl FirebaseAuth {
    /// Creates a verifier for the configured project, writing to `store`.
    pub fn new(config: FirebaseConfig, store: Arc<dyn AuthStore>) -> FirebaseAuth {
        let keys = KeyCache::new(config.jwk_url(), reqwest::Client::new());
        FirebaseAuth {
            config,
            keys: Arc::new(keys),
            store,
        }
    }

    /// The backing store, for direct user and session lookups.
    pub fn store(&self) -> &Arc<dyn AuthStore> {
        &self.store
    }

    /// Verifies `id_token` end to end and returns the upserted user record.
    ///
    /// Pipeline: structural parse, RS256 check, key resolution through the
    /// cached JWK set, signature verification, claims validation, then the
    /// user upsert and session insert. The first failing step aborts the
    /// attempt with its specific reason; nothing is written unless every
    /// check passed.
    pub async fn verify_token(&self, id_token: &str) -> crate::Result<UserRecord> {
        let parsed = jwt::parse(id_token)?;

        if parsed.header.alg != "RS256" {
            return Err(
                VerificationError::UnsupportedAlgorithm(parsed.header.alg).into()
            );
        }

        let keys = self.keys.get_or_refresh(self.store.as_ref()).await?;
        let key = jwk::select_key(&keys, &parsed.header.kid)
            .ok_or_else(|| VerificationError::KeyNotFound(parsed.header.kid.clone()))?;

        let decoding_key = jwt::import_key(key)?;
        let valid =
            jwt::verify_signature(&parsed.signed_content, &parsed.signature, &decoding_key)?;
        if !valid {
            return Err(VerificationError::InvalidSignature.into());
        }

        let now = clock::now_seconds();
        jwt::validate_claims(&parsed.payload, self.config.project_id(), now)?;

        let now_ms = clock::now_millis();
        let profile = UserProfile::from_claims(&parsed.payload);
        let user = self.store.upsert_user(profile, now_ms).await?;

        let expires_at = parsed.payload.exp.unwrap_or_default() * 1000;
        let session = self
            .store
            .create_session(&user.id, &user.firebase_uid, expires_at, now_ms)
            .await?;
        debug!(uid = %user.firebase_uid, session = %session.id, "verified token");

        Ok(user)
    }

    /// Looks up a user previously created by verification.
    pub async fn user_by_uid(&self, firebase_uid: &str) -> crate::Result<Option<UserRecord>> {
        Ok(self.store.user_by_uid(firebase_uid).await?)
    }

    /// Deletes a user and all of its sessions. Returns whether the user
    /// existed.
    pub async fn delete_user(&self, firebase_uid: &str) -> crate::Result<bool> {
        Ok(self.store.delete_user(firebase_uid).await?)
    }

    /// The maintenance sweep: removes every session whose expiry has passed,
    /// across all users. Returns the number of removed rows.
    pub async fn purge_expired_sessions(&self) -> crate::Result<usize> {
        let removed = self
            .store
            .purge_expired_sessions(clock::now_millis())
            .await?;
        if removed > 0 {
            debug!(removed, "purged expired sessions");
        }
        Ok(removed)
    }
}
