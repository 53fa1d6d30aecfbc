//! The `ContactStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! [`crate::Directory`] depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::contact::{Contact, ContactField, ContactPatch, Lookup, NewContact};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Offset/limit window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  usize,
  pub offset: usize,
}

impl Page {
  pub const DEFAULT_LIMIT: usize = 10;
  pub const MAX_LIMIT: usize = 500;

  /// Build a page, capping `limit` at [`Page::MAX_LIMIT`].
  pub fn new(limit: usize, offset: usize) -> Self {
    Self { limit: limit.min(Self::MAX_LIMIT), offset }
  }

  /// Slice an already-materialised sequence.
  pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
    items.into_iter().skip(self.offset).take(self.limit).collect()
  }
}

impl Default for Page {
  fn default() -> Self { Self { limit: Self::DEFAULT_LIMIT, offset: 0 } }
}

/// Parameters for [`ContactStore::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
  pub field:    ContactField,
  /// Matched case-insensitively anywhere in the field. SQL wildcards are
  /// literal.
  pub fragment: String,
  pub page:     Page,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Error bound for backends, letting the directory tell a uniqueness-constraint
/// rejection apart from an infrastructure failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// Whether the backend refused a write because it would duplicate a unique
  /// column (email or phone).
  fn is_conflict(&self) -> bool { false }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a contact store backend.
///
/// Every method is one unit of work: writes commit before the future resolves,
/// or leave the store untouched on error. Results are in insertion (id) order.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new contact and return it with its assigned id.
  fn insert(
    &self,
    draft: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// The lowest-id contact whose field equals the lookup value exactly.
  fn find_first(
    &self,
    lookup: Lookup,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// The lowest-id contact with exactly this name and last name.
  fn find_by_full_name<'a>(
    &'a self,
    name: &'a str,
    last_name: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// A window over all contacts.
  fn list(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Case-insensitive substring search on one field.
  fn search<'a>(
    &'a self,
    query: &'a ContactQuery,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Every stored contact, unpaginated.
  fn all(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Apply `patch` in place. Returns the updated contact, or `None` if no
  /// contact has that id (in which case nothing is written).
  fn update(
    &self,
    id: i64,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove a contact and return its last stored value.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Round-trip to the backend without touching data.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
