use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;
use serde_json::json;

use crate::client::FirebaseAuth;
use crate::error::Error;
use crate::identity::IdentityError;
use crate::jwk::PublicKeysError;

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // Any failed verification attempt, including key resolution, is
            // a 401 from the client's point of view; the body still carries
            // the specific reason.
            Error::Verification(_) => StatusCode::UNAUTHORIZED,

            Error::PublicKeys(err) => match err {
                PublicKeysError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                PublicKeysError::FetchPublicKeys(_)
                | PublicKeysError::UnexpectedStatus(_)
                | PublicKeysError::PublicKeyParse(_) => StatusCode::UNAUTHORIZED,
            },

            Error::Identity(err) => match err {
                // Forward the upstream status where there is one.
                IdentityError::Api { status, .. } => {
                    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                IdentityError::Http(_) => StatusCode::BAD_GATEWAY,
                IdentityError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            },

            Error::Store(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    #[serde(rename = "idToken")]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(rename = "firebaseUid")]
    firebase_uid: Option<String>,
}

async fn verify(
    auth: web::Data<FirebaseAuth>,
    body: web::Json<VerifyRequest>,
) -> HttpResponse {
    let Some(token) = body.id_token.as_deref().filter(|token| !token.is_empty()) else {
        return HttpResponse::BadRequest().json(json!({ "error": "idToken is required" }));
    };

    match auth.verify_token(token).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => err.error_response(),
    }
}

async fn user(auth: web::Data<FirebaseAuth>, query: web::Query<UserQuery>) -> HttpResponse {
    let Some(uid) = query.firebase_uid.as_deref().filter(|uid| !uid.is_empty()) else {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "firebaseUid is required" }));
    };

    match auth.user_by_uid(uid).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "user not found" })),
        Err(err) => err.error_response(),
    }
}

/// Registers the verification routes: `POST /verify` and `GET /user`.
///
/// Mount under a scope of your choosing and provide
/// `web::Data<FirebaseAuth>` as application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/verify", web::post().to(verify))
        .route("/user", web::get().to(user));
}
