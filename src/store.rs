//! The external store consumed by verification: user and session rows plus
//! the singleton key-cache slot. The trait models a transactional document
//! store with indexed lookups; [`MemoryStore`] is the in-process reference
//! implementation used by tests and small deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::jwk::CachedKeySet;
use crate::user::{SessionRecord, UserProfile, UserRecord};

/// Failure inside the backing store.
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage consumed by token verification.
///
/// Implementations are expected to index users by `firebase_uid` (unique) and
/// `email`, and sessions by `firebase_uid`, `user_id` and `expires_at`.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Creates or updates the user row for `profile.firebase_uid`. The row id
    /// and creation time are preserved across updates.
    async fn upsert_user(&self, profile: UserProfile, now: i64) -> StoreResult<UserRecord>;

    /// Looks up a user by Firebase UID.
    async fn user_by_uid(&self, firebase_uid: &str) -> StoreResult<Option<UserRecord>>;

    /// Looks up a user by email address.
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Deletes the user and every session carrying its `firebase_uid`.
    /// Returns whether a user row existed.
    async fn delete_user(&self, firebase_uid: &str) -> StoreResult<bool>;

    /// Inserts a session row, first pruning that uid's already-expired
    /// sessions. Sessions of other users are left alone.
    async fn create_session(
        &self,
        user_id: &str,
        firebase_uid: &str,
        expires_at: i64,
        now: i64,
    ) -> StoreResult<SessionRecord>;

    /// All sessions for a Firebase UID, live or expired.
    async fn sessions_for_uid(&self, firebase_uid: &str) -> StoreResult<Vec<SessionRecord>>;

    /// Global sweep removing every session with `expires_at < now`. Returns
    /// the number of rows removed. Idempotent and safe to run concurrently
    /// with verification.
    async fn purge_expired_sessions(&self, now: i64) -> StoreResult<usize>;

    /// Reads the singleton key-cache row, if present.
    async fn key_cache(&self) -> StoreResult<Option<CachedKeySet>>;

    /// Replaces the singleton key-cache row. Implemented as a keyed upsert so
    /// a concurrent reader never observes an empty slot mid-replacement.
    async fn put_key_cache(&self, set: CachedKeySet) -> StoreResult<()>;
}

/// In-memory [`AuthStore`] backed by `tokio::sync::RwLock` maps.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
    sessions: RwLock<HashMap<String, SessionRecord>>,
    key_cache: RwLock<Option<CachedKeySet>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn upsert_user(&self, profile: UserProfile, now: i64) -> StoreResult<UserRecord> {
        let mut users = self.users.write().await;

        let (id, created_at) = match users.get(&profile.firebase_uid) {
            Some(existing) => (existing.id.clone(), existing.created_at),
            None => (Uuid::new_v4().to_string(), now),
        };

        let record = UserRecord {
            id,
            firebase_uid: profile.firebase_uid,
            email: profile.email,
            email_verified: profile.email_verified,
            display_name: profile.display_name,
            photo_url: profile.photo_url,
            phone_number: profile.phone_number,
            provider_id: profile.provider_id,
            is_anonymous: profile.is_anonymous,
            last_sign_in_time: profile.last_sign_in_time,
            created_at,
            updated_at: now,
        };

        users.insert(record.firebase_uid.clone(), record.clone());
        Ok(record)
    }

    async fn user_by_uid(&self, firebase_uid: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(firebase_uid).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn delete_user(&self, firebase_uid: &str) -> StoreResult<bool> {
        let removed = self.users.write().await.remove(firebase_uid).is_some();
        self.sessions
            .write()
            .await
            .retain(|_, session| session.firebase_uid != firebase_uid);
        Ok(removed)
    }

    async fn create_session(
        &self,
        user_id: &str,
        firebase_uid: &str,
        expires_at: i64,
        now: i64,
    ) -> StoreResult<SessionRecord> {
        let mut sessions = self.sessions.write().await;

        // Opportunistic cleanup for this uid only; the global sweep is
        // purge_expired_sessions.
        sessions.retain(|_, session| {
            session.firebase_uid != firebase_uid || session.expires_at >= now
        });

        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            firebase_uid: firebase_uid.to_owned(),
            created_at: now,
            expires_at,
        };
        sessions.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn sessions_for_uid(&self, firebase_uid: &str) -> StoreResult<Vec<SessionRecord>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|session| session.firebase_uid == firebase_uid)
            .cloned()
            .collect())
    }

    async fn purge_expired_sessions(&self, now: i64) -> StoreResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at >= now);
        Ok(before - sessions.len())
    }

    async fn key_cache(&self) -> StoreResult<Option<CachedKeySet>> {
        Ok(self.key_cache.read().await.clone())
    }

    async fn put_key_cache(&self, set: CachedKeySet) -> StoreResult<()> {
        *self.key_cache.write().await = Some(set);
        Ok(())
    }
}
