//! # actix-firebase-sessions
//!
//! This crate verifies Firebase ID tokens inside an `actix-web` backend and
//! maintains local user and session records derived from verified claims.
//! The provider's public signing keys are fetched on demand and cached in the
//! backing store, with freshness driven by the `Cache-Control: max-age`
//! response header.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use actix_web::{web, App, HttpServer};
//! use actix_firebase_sessions::{routes, FirebaseAuth, FirebaseConfig, MemoryStore};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = FirebaseConfig::new("your-project-id");
//!     let auth = FirebaseAuth::new(config, Arc::new(MemoryStore::new()));
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .app_data(web::Data::new(auth.clone()))
//!             .service(web::scope("/auth").configure(routes::configure))
//!     })
//!     .bind(("127.0.0.1", 8080))?
//!     .run()
//!     .await
//! }
//! ```

mod client;
mod clock;
mod config;
mod error;
mod identity;
pub mod jwk;
pub mod jwt;
pub mod routes;
mod store;
mod user;

pub use client::*;
pub use config::*;
pub use error::*;
pub use identity::*;
pub use store::*;
pub use user::*;
