use serde::{Deserialize, Serialize};

use crate::jwt::TokenPayload;

/// A locally persisted user, derived from the verified claims of a Firebase
/// ID token and keyed by the token's `sub`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Store-assigned row id. Stable across profile updates.
    pub id: String,

    /// The Firebase UID (the token's `sub`). Unique per user.
    pub firebase_uid: String,

    /// User's email address.
    pub email: Option<String>,

    /// Whether the email has been verified.
    pub email_verified: Option<bool>,

    /// Display name, from the token's `name` claim.
    pub display_name: Option<String>,

    /// Profile picture URL, from the token's `picture` claim.
    pub photo_url: Option<String>,

    /// Phone number in E.164 format.
    pub phone_number: Option<String>,

    /// The sign-in provider used (e.g. "google.com", "password").
    pub provider_id: Option<String>,

    /// True when the sign-in provider is `"anonymous"`.
    pub is_anonymous: bool,

    /// Last sign-in time from the token's `auth_time`, epoch milliseconds.
    pub last_sign_in_time: i64,

    /// Row creation time, epoch milliseconds.
    pub created_at: i64,

    /// Last update time, epoch milliseconds.
    pub updated_at: i64,
}

/// Profile fields extracted from a verified payload, ready to be upserted.
#[derive(Clone, Debug)]
pub struct UserProfile {
    /// The Firebase UID the row is keyed by.
    pub firebase_uid: String,
    /// Email address, if the token carries one.
    pub email: Option<String>,
    /// Email verification state.
    pub email_verified: Option<bool>,
    /// Display name.
    pub display_name: Option<String>,
    /// Profile picture URL.
    pub photo_url: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Sign-in provider id.
    pub provider_id: Option<String>,
    /// Whether the user signed in anonymously.
    pub is_anonymous: bool,
    /// `auth_time` converted to epoch milliseconds.
    pub last_sign_in_time: i64,
}

impl UserProfile {
    /// Derives the persisted profile from token claims. Callers must have
    /// validated the payload first; `sub` is taken as the Firebase UID.
    pub fn from_claims(payload: &TokenPayload) -> UserProfile {
        let provider_id = payload
            .firebase
            .as_ref()
            .and_then(|firebase| firebase.sign_in_provider.clone());

        UserProfile {
            firebase_uid: payload.sub.clone().unwrap_or_default(),
            email: payload.email.clone(),
            email_verified: payload.email_verified,
            display_name: payload.name.clone(),
            photo_url: payload.picture.clone(),
            phone_number: payload.phone_number.clone(),
            is_anonymous: provider_id.as_deref() == Some("anonymous"),
            provider_id,
            last_sign_in_time: payload.auth_time.unwrap_or_default() * 1000,
        }
    }
}

/// One sign-in session. A new session is created on every successful
/// verification; multiple live sessions per user are allowed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Store-assigned session id.
    pub id: String,

    /// The row id of the owning [`UserRecord`].
    pub user_id: String,

    /// The owning user's Firebase UID.
    pub firebase_uid: String,

    /// Session creation time, epoch milliseconds.
    pub created_at: i64,

    /// Mirrors the token's `exp`, epoch milliseconds.
    pub expires_at: i64,
}
