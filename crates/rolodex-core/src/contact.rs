//! The `Contact` entity and the inputs that create or modify it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stand-in for an omitted `name` or `last_name`.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Stand-in for an omitted `description`.
pub const EMPTY_DESCRIPTION: &str = "-";

/// Largest accepted phone number.
pub const MAX_PHONE: i64 = 9_999_999_999_999_999;

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:          i64,
  pub name:        String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       i64,
  pub birthday:    NaiveDate,
  pub description: String,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::Directory::create`]. Field constraints are checked by
/// the transport before a draft is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub name:        String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       i64,
  pub birthday:    NaiveDate,
  pub description: String,
}

impl NewContact {
  /// A draft with the name fields and description set to their defaults.
  pub fn new(email: impl Into<String>, phone: i64, birthday: NaiveDate) -> Self {
    Self {
      name: UNKNOWN_NAME.to_owned(),
      last_name: UNKNOWN_NAME.to_owned(),
      email: email.into(),
      phone,
      birthday,
      description: EMPTY_DESCRIPTION.to_owned(),
    }
  }

  pub fn with_name(
    mut self,
    name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Self {
    self.name = name.into();
    self.last_name = last_name.into();
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }
}

/// Input to [`crate::Directory::update`]: every mutable field except the
/// birthday, which a full update leaves as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
  pub name:        String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       i64,
  pub description: String,
}

/// Column-level changes handed to the store. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
  pub name:        Option<String>,
  pub last_name:   Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<i64>,
  pub description: Option<String>,
}

impl ContactPatch {
  pub fn rename(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()), ..Self::default() }
  }
}

impl From<ContactUpdate> for ContactPatch {
  fn from(u: ContactUpdate) -> Self {
    Self {
      name:        Some(u.name),
      last_name:   Some(u.last_name),
      email:       Some(u.email),
      phone:       Some(u.phone),
      description: Some(u.description),
    }
  }
}

// ─── Search keys ─────────────────────────────────────────────────────────────

/// A searchable contact attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
  Name,
  LastName,
  Email,
  Phone,
}

impl ContactField {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::LastName => "last_name",
      Self::Email => "email",
      Self::Phone => "phone",
    }
  }
}

impl fmt::Display for ContactField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An exact-equality lookup on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
  Name(String),
  LastName(String),
  Email(String),
  Phone(i64),
}

impl Lookup {
  pub fn field(&self) -> ContactField {
    match self {
      Self::Name(_) => ContactField::Name,
      Self::LastName(_) => ContactField::LastName,
      Self::Email(_) => ContactField::Email,
      Self::Phone(_) => ContactField::Phone,
    }
  }
}

impl fmt::Display for Lookup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Name(v) | Self::LastName(v) | Self::Email(v) => {
        write!(f, "{} = {v:?}", self.field())
      }
      Self::Phone(v) => write!(f, "phone = {v}"),
    }
  }
}
