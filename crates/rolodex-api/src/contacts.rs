//! Handlers for `/contacts` CRUD endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | `?limit` (default 10, max 500), `?offset` |
//! | `POST`   | `/contacts` | Body: [`ContactBody`]; 201, or 409 on a duplicate |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactBody`]; birthday is not changed |
//! | `DELETE` | `/contacts/{id}` | Returns the deleted contact |
//! | `PATCH`  | `/contacts/{id}/to_name` | Body: `{"name":"..."}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use rolodex_core::{
  Directory,
  contact::{
    Contact, ContactUpdate, EMPTY_DESCRIPTION, MAX_PHONE, NewContact, UNKNOWN_NAME,
  },
  store::{ContactStore, Page},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

// ─── Shared extractors ───────────────────────────────────────────────────────

/// `?limit=&offset=` query parameters.
#[derive(Debug, Deserialize, Validate)]
pub struct PageParams {
  #[serde(default = "default_limit")]
  #[validate(range(max = 500))]
  pub limit:  usize,
  #[serde(default)]
  pub offset: usize,
}

fn default_limit() -> usize { Page::DEFAULT_LIMIT }

impl From<PageParams> for Page {
  fn from(p: PageParams) -> Self { Page::new(p.limit, p.offset) }
}

/// The `{id}` path segment; ids start at 1.
#[derive(Debug, Deserialize, Validate)]
pub struct IdPath {
  #[validate(range(min = 1))]
  pub id: i64,
}

// ─── Bodies ──────────────────────────────────────────────────────────────────

fn unknown_name() -> String { UNKNOWN_NAME.to_owned() }

fn empty_description() -> String { EMPTY_DESCRIPTION.to_owned() }

/// JSON body accepted by `POST /contacts` and `PUT /contacts/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactBody {
  #[serde(default = "unknown_name")]
  #[validate(length(min = 2, max = 30))]
  pub name:        String,
  #[serde(default = "unknown_name")]
  #[validate(length(min = 2, max = 40))]
  pub last_name:   String,
  #[validate(email)]
  pub email:       String,
  #[validate(range(min = 1, max = MAX_PHONE))]
  pub phone:       i64,
  pub birthday:    NaiveDate,
  #[serde(default = "empty_description")]
  #[validate(length(max = 3000))]
  pub description: String,
}

impl From<ContactBody> for NewContact {
  fn from(b: ContactBody) -> Self {
    NewContact {
      name:        b.name,
      last_name:   b.last_name,
      email:       b.email,
      phone:       b.phone,
      birthday:    b.birthday,
      description: b.description,
    }
  }
}

impl From<ContactBody> for ContactUpdate {
  fn from(b: ContactBody) -> Self {
    ContactUpdate {
      name:        b.name,
      last_name:   b.last_name,
      email:       b.email,
      phone:       b.phone,
      description: b.description,
    }
  }
}

/// JSON body accepted by `PATCH /contacts/{id}/to_name`.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameBody {
  #[validate(length(min = 2, max = 30))]
  pub name: String,
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /contacts[?limit=...][&offset=...]`
pub async fn list<S>(
  State(dir): State<Arc<Directory<S>>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  params.validate()?;
  Ok(Json(dir.list(params.into()).await?))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /contacts`: returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(dir): State<Arc<Directory<S>>>,
  Json(body): Json<ContactBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + 'static,
{
  body.validate()?;
  let contact = dir.create(body.into()).await?;
  tracing::info!(id = contact.id, "contact created");
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path(path): Path<IdPath>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  path.validate()?;
  Ok(Json(dir.get(path.id).await?))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}`: replaces everything but the birthday.
pub async fn update_one<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path(path): Path<IdPath>,
  Json(body): Json<ContactBody>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  path.validate()?;
  body.validate()?;
  Ok(Json(dir.update(path.id, body.into()).await?))
}

/// `PATCH /contacts/{id}/to_name`
pub async fn rename_one<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path(path): Path<IdPath>,
  Json(body): Json<RenameBody>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  path.validate()?;
  body.validate()?;
  Ok(Json(dir.rename(path.id, body.name).await?))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`: returns the contact as it was before removal.
pub async fn delete_one<S>(
  State(dir): State<Arc<Directory<S>>>,
  Path(path): Path<IdPath>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  path.validate()?;
  let contact = dir.delete(path.id).await?;
  tracing::info!(id = contact.id, "contact deleted");
  Ok(Json(contact))
}
