//! Minimal server wiring: token verification routes backed by the in-memory
//! store.
//!
//! Run with `FIREBASE_PROJECT_ID=<your-project> cargo run --example server`,
//! then POST a token:
//!
//! ```sh
//! curl -X POST http://127.0.0.1:8080/auth/verify \
//!   -H 'Content-Type: application/json' \
//!   -d '{"idToken": "<firebase-id-token>"}'
//! ```

use std::sync::Arc;

use actix_firebase_sessions::{routes, FirebaseAuth, FirebaseConfig, MemoryStore};
use actix_web::{web, App, HttpServer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = FirebaseConfig::from_env()
        .expect("FIREBASE_PROJECT_ID must be set");
    let auth = FirebaseAuth::new(config, Arc::new(MemoryStore::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(auth.clone()))
            .service(web::scope("/auth").configure(routes::configure))
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
