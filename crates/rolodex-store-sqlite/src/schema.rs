//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use rusqlite::{Connection, functions::FunctionFlags};

/// Name of the scalar function that lower-cases text with full Unicode
/// case mapping. SQLite's own `lower()` and `LIKE` only fold ASCII.
pub const FOLD_FN: &str = "fold";

/// Register the custom SQL functions on `conn`. Must run on every connection
/// before any search query.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FN,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: Option<String> = ctx.get(0)?;
      Ok(text.map(|t| t.to_lowercase()))
    },
  )
}

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    last_name   TEXT    NOT NULL,
    email       TEXT    NOT NULL UNIQUE,
    phone       INTEGER NOT NULL UNIQUE,
    birthday    TEXT    NOT NULL,           -- YYYY-MM-DD
    description TEXT    NOT NULL DEFAULT '-'
);

CREATE INDEX IF NOT EXISTS contacts_name_idx      ON contacts(name);
CREATE INDEX IF NOT EXISTS contacts_last_name_idx ON contacts(last_name);
CREATE INDEX IF NOT EXISTS contacts_birthday_idx  ON contacts(birthday);

PRAGMA user_version = 1;
";
