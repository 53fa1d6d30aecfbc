//! Error types for `rolodex-core`.

use std::fmt;

use thiserror::Error;

use crate::contact::Lookup;

/// Which uniqueness rule a rejected write collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplicate {
  Email,
  Phone,
  /// The same (name, last_name) pair.
  FullName,
  /// The storage backend rejected the write on one of its own `UNIQUE`
  /// constraints; the directory does not know which.
  Constraint,
}

impl fmt::Display for Duplicate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Email => "a contact with this email already exists",
      Self::Phone => "a contact with this phone already exists",
      Self::FullName => "a contact with this name and last name already exists",
      Self::Constraint => "email or phone already belongs to another contact",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact not found: {0}")]
  ContactNotFound(i64),

  #[error("no contact matches {0}")]
  NoMatch(Lookup),

  #[error("duplicate data: {0}")]
  Conflict(Duplicate),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// True for both "no such id" and "search found nothing".
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::ContactNotFound(_) | Self::NoMatch(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
