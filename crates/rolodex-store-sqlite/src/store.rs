//! [`SqliteStore`]: the SQLite implementation of [`ContactStore`].

use std::path::Path;

use rolodex_core::{
  contact::{Contact, ContactPatch, Lookup, NewContact},
  store::{ContactQuery, ContactStore, Page},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    CONTACT_COLUMNS, RawContact, encode_date, encode_lookup, into_contacts,
    like_pattern, raw_contact, search_expr,
  },
  schema::{FOLD_FN, SCHEMA, register_functions},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-row `SELECT` over the contact columns.
  async fn query_one(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(params), raw_contact)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  /// Run a multi-row `SELECT` over the contact columns.
  async fn query_many(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), raw_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    into_contacts(raws)
  }
}

fn page_params(page: Page) -> [rusqlite::types::Value; 2] {
  use rusqlite::types::Value;
  [
    Value::Integer(i64::try_from(page.limit).unwrap_or(i64::MAX)),
    Value::Integer(i64::try_from(page.offset).unwrap_or(i64::MAX)),
  ]
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, draft: NewContact) -> Result<Contact> {
    let birthday_str = encode_date(draft.birthday);
    let name         = draft.name.clone();
    let last_name    = draft.last_name.clone();
    let email        = draft.email.clone();
    let description  = draft.description.clone();
    let phone        = draft.phone;

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (name, last_name, email, phone, birthday, description)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![name, last_name, email, phone, birthday_str, description],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Contact {
      id,
      name:        draft.name,
      last_name:   draft.last_name,
      email:       draft.email,
      phone:       draft.phone,
      birthday:    draft.birthday,
      description: draft.description,
    })
  }

  async fn get(&self, id: i64) -> Result<Option<Contact>> {
    self
      .query_one(
        format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
        vec![id.into()],
      )
      .await
  }

  async fn find_first(&self, lookup: Lookup) -> Result<Option<Contact>> {
    let (column, value) = encode_lookup(lookup);
    self
      .query_one(
        format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts WHERE {column} = ?1
           ORDER BY id LIMIT 1"
        ),
        vec![value],
      )
      .await
  }

  async fn find_by_full_name(&self, name: &str, last_name: &str) -> Result<Option<Contact>> {
    self
      .query_one(
        format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts WHERE name = ?1 AND last_name = ?2
           ORDER BY id LIMIT 1"
        ),
        vec![name.to_owned().into(), last_name.to_owned().into()],
      )
      .await
  }

  async fn list(&self, page: Page) -> Result<Vec<Contact>> {
    self
      .query_many(
        format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id LIMIT ?1 OFFSET ?2"),
        page_params(page).into(),
      )
      .await
  }

  async fn search(&self, query: &ContactQuery) -> Result<Vec<Contact>> {
    let expr = search_expr(query.field);
    let [limit, offset] = page_params(query.page);
    self
      .query_many(
        format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE {FOLD_FN}({expr}) LIKE ?1 ESCAPE '\\'
           ORDER BY id LIMIT ?2 OFFSET ?3"
        ),
        vec![like_pattern(&query.fragment).into(), limit, offset],
      )
      .await
  }

  async fn all(&self) -> Result<Vec<Contact>> {
    self
      .query_many(format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"), vec![])
      .await
  }

  async fn update(&self, id: i64, patch: ContactPatch) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE contacts SET
             name        = COALESCE(?2, name),
             last_name   = COALESCE(?3, last_name),
             email       = COALESCE(?4, email),
             phone       = COALESCE(?5, phone),
             description = COALESCE(?6, description)
           WHERE id = ?1",
          rusqlite::params![
            id,
            patch.name,
            patch.last_name,
            patch.email,
            patch.phone,
            patch.description,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
          rusqlite::params![id],
          raw_contact,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn delete(&self, id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
            rusqlite::params![id],
            raw_contact,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?;
          tx.commit()?;
        }
        Ok(raw)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
