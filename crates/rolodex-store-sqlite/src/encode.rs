//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Birthdays are stored as ISO 8601 calendar dates (`YYYY-MM-DD`), phones as
//! integers.

use chrono::NaiveDate;
use rolodex_core::contact::{Contact, ContactField, Lookup};
use rusqlite::types::Value;

use crate::{Error, Result};

/// Column list matching [`raw_contact`]'s positional reads.
pub const CONTACT_COLUMNS: &str =
  "id, name, last_name, email, phone, birthday, description";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Search keys ─────────────────────────────────────────────────────────────

/// The SQL expression a substring search on `field` matches against. Phones
/// are matched on their decimal rendering.
pub fn search_expr(field: ContactField) -> &'static str {
  match field {
    ContactField::Name => "name",
    ContactField::LastName => "last_name",
    ContactField::Email => "email",
    ContactField::Phone => "CAST(phone AS TEXT)",
  }
}

/// Column name and bound value for an exact lookup.
pub fn encode_lookup(lookup: Lookup) -> (&'static str, Value) {
  match lookup {
    Lookup::Name(v) => ("name", Value::Text(v)),
    Lookup::LastName(v) => ("last_name", Value::Text(v)),
    Lookup::Email(v) => ("email", Value::Text(v)),
    Lookup::Phone(v) => ("phone", Value::Integer(v)),
  }
}

/// `%fragment%`, lower-cased, with `%`, `_` and the escape character itself
/// escaped, for use with `fold(...) LIKE ... ESCAPE '\'`.
pub fn like_pattern(fragment: &str) -> String {
  let mut pattern = String::with_capacity(fragment.len() + 2);
  pattern.push('%');
  for ch in fragment.to_lowercase().chars() {
    if matches!(ch, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `contacts` row as read from SQLite, before date parsing.
pub struct RawContact {
  pub id:          i64,
  pub name:        String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       i64,
  pub birthday:    String,
  pub description: String,
}

impl RawContact {
  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:          self.id,
      name:        self.name,
      last_name:   self.last_name,
      email:       self.email,
      phone:       self.phone,
      birthday:    decode_date(&self.birthday)?,
      description: self.description,
    })
  }
}

/// Row mapper for queries selecting [`CONTACT_COLUMNS`].
pub fn raw_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    id:          row.get(0)?,
    name:        row.get(1)?,
    last_name:   row.get(2)?,
    email:       row.get(3)?,
    phone:       row.get(4)?,
    birthday:    row.get(5)?,
    description: row.get(6)?,
  })
}

pub fn into_contacts(raws: Vec<RawContact>) -> Result<Vec<Contact>> {
  raws.into_iter().map(RawContact::into_contact).collect()
}
