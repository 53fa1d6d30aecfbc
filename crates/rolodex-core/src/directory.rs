//! [`Directory`]: every domain operation on contacts.
//!
//! The directory owns uniqueness enforcement and the birthday window; the
//! injected [`ContactStore`] only persists and fetches rows.

use chrono::{Local, NaiveDate};

use crate::{
  Duplicate, Error, Result, birthday,
  contact::{Contact, ContactField, ContactPatch, ContactUpdate, Lookup, NewContact},
  store::{ContactQuery, ContactStore, Page, StoreError},
};

fn store_err<E: StoreError>(e: E) -> Error {
  if e.is_conflict() {
    Error::Conflict(Duplicate::Constraint)
  } else {
    Error::Store(Box::new(e))
  }
}

/// The contact directory service, generic over its storage backend.
///
/// Cloning is as cheap as cloning the store.
#[derive(Debug, Clone)]
pub struct Directory<S> {
  store: S,
}

impl<S: ContactStore> Directory<S> {
  pub fn new(store: S) -> Self { Self { store } }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// A page of contacts in insertion order. Out-of-range pages are empty.
  pub async fn list(&self, page: Page) -> Result<Vec<Contact>> {
    self.store.list(page).await.map_err(store_err)
  }

  pub async fn get(&self, id: i64) -> Result<Contact> {
    self
      .store
      .get(id)
      .await
      .map_err(store_err)?
      .ok_or(Error::ContactNotFound(id))
  }

  /// The first contact whose field equals the lookup value exactly.
  pub async fn search_exact_by(&self, lookup: Lookup) -> Result<Contact> {
    self
      .store
      .find_first(lookup.clone())
      .await
      .map_err(store_err)?
      .ok_or(Error::NoMatch(lookup))
  }

  /// Contacts whose field contains `fragment`, ignoring case.
  pub async fn search_substring_by(
    &self,
    field: ContactField,
    fragment: impl Into<String>,
    page: Page,
  ) -> Result<Vec<Contact>> {
    let query = ContactQuery { field, fragment: fragment.into(), page };
    self.store.search(&query).await.map_err(store_err)
  }

  /// Contacts whose next birthday is at most `window_days` from today.
  pub async fn list_upcoming_birthdays(
    &self,
    window_days: u32,
    page: Page,
  ) -> Result<Vec<Contact>> {
    self
      .list_upcoming_birthdays_on(Local::now().date_naive(), window_days, page)
      .await
  }

  /// As [`Directory::list_upcoming_birthdays`], counted from `today`.
  ///
  /// Every contact is scanned; `page` slices the filtered set, not the table.
  pub async fn list_upcoming_birthdays_on(
    &self,
    today: NaiveDate,
    window_days: u32,
    page: Page,
  ) -> Result<Vec<Contact>> {
    let everyone = self.store.all().await.map_err(store_err)?;
    Ok(page.apply(
      everyone
        .into_iter()
        .filter(|c| birthday::is_within_window(c.birthday, today, window_days)),
    ))
  }

  pub async fn ping(&self) -> Result<()> {
    self.store.ping().await.map_err(store_err)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Create a contact. Rejected with [`Error::Conflict`] when an existing
  /// contact has the same email, the same phone, or the same name and last
  /// name; each rule is checked on its own.
  pub async fn create(&self, draft: NewContact) -> Result<Contact> {
    if let Some(dup) = self.find_duplicate(&draft).await? {
      return Err(Error::Conflict(dup));
    }
    self.store.insert(draft).await.map_err(store_err)
  }

  /// Replace name, last name, email, phone and description. The birthday is
  /// kept. Uniqueness is not pre-checked here; the store's own constraints
  /// still reject a colliding email or phone.
  pub async fn update(&self, id: i64, replacement: ContactUpdate) -> Result<Contact> {
    self.patch(id, replacement.into()).await
  }

  /// Change only the name.
  pub async fn rename(&self, id: i64, new_name: impl Into<String>) -> Result<Contact> {
    self.patch(id, ContactPatch::rename(new_name)).await
  }

  /// Remove a contact, returning what was stored.
  pub async fn delete(&self, id: i64) -> Result<Contact> {
    self
      .store
      .delete(id)
      .await
      .map_err(store_err)?
      .ok_or(Error::ContactNotFound(id))
  }

  async fn patch(&self, id: i64, patch: ContactPatch) -> Result<Contact> {
    self
      .store
      .update(id, patch)
      .await
      .map_err(store_err)?
      .ok_or(Error::ContactNotFound(id))
  }

  async fn find_duplicate(&self, draft: &NewContact) -> Result<Option<Duplicate>> {
    let by_email = self
      .store
      .find_first(Lookup::Email(draft.email.clone()))
      .await
      .map_err(store_err)?;
    if by_email.is_some() {
      return Ok(Some(Duplicate::Email));
    }

    let by_phone = self
      .store
      .find_first(Lookup::Phone(draft.phone))
      .await
      .map_err(store_err)?;
    if by_phone.is_some() {
      return Ok(Some(Duplicate::Phone));
    }

    let by_name = self
      .store
      .find_by_full_name(&draft.name, &draft.last_name)
      .await
      .map_err(store_err)?;
    Ok(by_name.map(|_| Duplicate::FullName))
  }
}
