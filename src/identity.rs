//! Thin passthrough client for the Firebase identity REST API. Each call
//! builds a JSON request, forwards it, and surfaces non-2xx responses as
//! errors carrying the response body text. Responses are returned as raw JSON
//! and not interpreted here.

use serde_json::{json, Value};
use thiserror::Error;

use crate::config::FirebaseConfig;

/// Errors from identity REST passthrough calls.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The request never produced a response.
    #[error("identity request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("identity API returned HTTP {status}: {body}")]
    Api {
        /// The upstream status code.
        status: reqwest::StatusCode,
        /// The upstream response body, verbatim.
        body: String,
    },

    /// No API key was configured.
    #[error("no API key configured for identity REST calls")]
    MissingApiKey,
}

/// Client for the identity REST API (`accounts:*`) and the secure-token
/// refresh endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    identity_url: String,
    secure_token_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Builds a client from configuration. Requires an API key.
    pub fn new(
        config: &FirebaseConfig,
        http: reqwest::Client,
    ) -> Result<IdentityClient, IdentityError> {
        let api_key = config
            .api_key()
            .ok_or(IdentityError::MissingApiKey)?
            .to_owned();

        Ok(IdentityClient {
            http,
            identity_url: config.identity_url().to_owned(),
            secure_token_url: config.secure_token_url().to_owned(),
            api_key,
        })
    }

    /// Looks up the account profile behind an ID token.
    pub async fn lookup(&self, id_token: &str) -> Result<Value, IdentityError> {
        self.post("accounts:lookup", json!({ "idToken": id_token }))
            .await
    }

    /// Sends a password-reset email.
    pub async fn send_password_reset(&self, email: &str) -> Result<Value, IdentityError> {
        self.post(
            "accounts:sendOobCode",
            json!({ "requestType": "PASSWORD_RESET", "email": email }),
        )
        .await
    }

    /// Sends an email-verification mail to the signed-in user.
    pub async fn send_email_verification(
        &self,
        id_token: &str,
    ) -> Result<Value, IdentityError> {
        self.post(
            "accounts:sendOobCode",
            json!({ "requestType": "VERIFY_EMAIL", "idToken": id_token }),
        )
        .await
    }

    /// Deletes the account behind an ID token.
    pub async fn delete_account(&self, id_token: &str) -> Result<Value, IdentityError> {
        self.post("accounts:delete", json!({ "idToken": id_token }))
            .await
    }

    /// Exchanges a refresh token for a fresh ID token.
    pub async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Value, IdentityError> {
        let url = format!("{}/token?key={}", self.secure_token_url, self.api_key);
        let body = json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        });
        let response = self.http.post(url).json(&body).send().await?;
        Self::into_json(response).await
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, IdentityError> {
        let url = format!("{}/{}?key={}", self.identity_url, endpoint, self.api_key);
        let response = self.http.post(url).json(&body).send().await?;
        Self::into_json(response).await
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, IdentityError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api { status, body });
        }
        Ok(response.json().await?)
    }
}
