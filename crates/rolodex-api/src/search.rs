//! Search handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts/search/{field}/{value}` | Exact match; first hit or 404 |
//! | `GET`  | `/contacts/search/{field}/{value}/like` | Case-insensitive substring; `?limit`, `?offset` |
//! | `GET`  | `/contacts/birthdays/{days}` | Birthdays in the next `days` days; `?limit`, `?offset` |
//!
//! `{field}` is one of `name`, `last_name`, `email`, `phone`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use rolodex_core::{
  Directory,
  contact::{Contact, ContactField, Lookup},
  store::ContactStore,
};
use serde::Deserialize;
use validator::Validate;

use crate::{contacts::PageParams, error::ApiError};

fn lookup(field: ContactField, value: String) -> Result<Lookup, ApiError> {
  Ok(match field {
    ContactField::Name => Lookup::Name(value),
    ContactField::LastName => Lookup::LastName(value),
    ContactField::Email => Lookup::Email(value),
    ContactField::Phone => Lookup::Phone(
      value
        .parse()
        .map_err(|_| ApiError::invalid("phone", "integer"))?,
    ),
  })
}

// ─── Exact ───────────────────────────────────────────────────────────────────

/// `GET /contacts/search/{field}/{value}`
pub async fn exact<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path((field, value)): Path<(ContactField, String)>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  let lookup = lookup(field, value)?;
  Ok(Json(dir.search_exact_by(lookup).await?))
}

// ─── Substring ───────────────────────────────────────────────────────────────

/// `GET /contacts/search/{field}/{value}/like[?limit=...][&offset=...]`
pub async fn like<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path((field, fragment)): Path<(ContactField, String)>,
  Query(params): Query<PageParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  params.validate()?;
  if field == ContactField::Phone && !fragment.bytes().all(|b| b.is_ascii_digit()) {
    return Err(ApiError::invalid("phone", "digits"));
  }
  Ok(Json(dir.search_substring_by(field, fragment, params.into()).await?))
}

// ─── Birthdays ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct DaysPath {
  #[validate(range(min = 0))]
  pub days: i64,
}

/// `GET /contacts/birthdays/{days}[?limit=...][&offset=...]`
pub async fn birthdays<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path(path): Path<DaysPath>,
  Query(params): Query<PageParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  path.validate()?;
  params.validate()?;
  // Any window wider than u32::MAX days already covers every birthday.
  let window = u32::try_from(path.days).unwrap_or(u32::MAX);
  Ok(Json(dir.list_upcoming_birthdays(window, params.into()).await?))
}
