//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by a [`Directory`] over any
//! [`rolodex_core::store::ContactStore`]. Transport concerns (listening,
//! tracing, TLS) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rolodex_api::api_router(directory.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod health;
pub mod search;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use rolodex_core::{Directory, store::ContactStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `directory`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(directory: Arc<Directory<S>>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    // CRUD
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update_one::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .route("/contacts/{id}/to_name", patch(contacts::rename_one::<S>))
    // Search
    .route("/contacts/search/{field}/{value}", get(search::exact::<S>))
    .route("/contacts/search/{field}/{value}/like", get(search::like::<S>))
    .route("/contacts/birthdays/{days}", get(search::birthdays::<S>))
    // Health
    .route("/healthchecker", get(health::handler::<S>))
    .with_state(directory)
}
