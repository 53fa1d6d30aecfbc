//! Handler for `GET /healthchecker`.

use std::sync::Arc;

use axum::{Json, extract::State};
use rolodex_core::{Directory, store::ContactStore};
use serde_json::{Value, json};

use crate::error::ApiError;

/// `GET /healthchecker`: 200 once the store answers a trivial query.
pub async fn handler<S>(State(dir): State<Arc<Directory<S>>>) -> Result<Json<Value>, ApiError>
where
  S: ContactStore + 'static,
{
  dir.ping().await?;
  Ok(Json(json!({ "message": "Rolodex is up and the database is reachable" })))
}
