//! Integration tests for `SqliteStore` and the directory running on it,
//! against an in-memory database.

use chrono::NaiveDate;
use rolodex_core::{
  Directory, Duplicate, Error as CoreError,
  contact::{ContactField, ContactPatch, ContactUpdate, Lookup, NewContact},
  store::{ContactStore, Page, StoreError as _},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn directory() -> Directory<SqliteStore> { Directory::new(store().await) }

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

fn draft(name: &str, last_name: &str, email: &str, phone: i64) -> NewContact {
  NewContact::new(email, phone, date(1990, 6, 15)).with_name(name, last_name)
}

fn alice() -> NewContact { draft("Alice", "Liddell", "alice@example.com", 5550001) }

fn bob() -> NewContact { draft("Bob", "Smith", "bob@example.com", 5550002) }

// ─── Store ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_increasing_ids() {
  let s = store().await;
  let a = s.insert(alice()).await.unwrap();
  let b = s.insert(bob()).await.unwrap();
  assert!(a.id >= 1);
  assert!(b.id > a.id);

  let fetched = s.get(a.id).await.unwrap().unwrap();
  assert_eq!(fetched, a);
}

#[tokio::test]
async fn unique_email_is_enforced_by_the_schema() {
  let s = store().await;
  s.insert(alice()).await.unwrap();

  let err = s
    .insert(draft("Other", "Person", "alice@example.com", 1))
    .await
    .unwrap_err();
  assert!(err.is_conflict(), "{err}");
}

#[tokio::test]
async fn patch_leaves_unset_columns_alone() {
  let s = store().await;
  let a = s.insert(alice()).await.unwrap();

  let patched = s
    .update(a.id, ContactPatch { description: Some("met at the tea party".into()), ..Default::default() })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(patched.description, "met at the tea party");
  assert_eq!(patched.name, a.name);
  assert_eq!(patched.email, a.email);
  assert_eq!(patched.birthday, a.birthday);
}

#[tokio::test]
async fn update_and_delete_missing_return_none() {
  let s = store().await;
  assert!(s.update(42, ContactPatch::rename("Xavier")).await.unwrap().is_none());
  assert!(s.delete(42).await.unwrap().is_none());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.insert(draft("Percy", "Jones", "per%cy@example.com", 10)).await.unwrap();
  s.insert(draft("Persy", "Jones", "persy@example.com", 11)).await.unwrap();

  let d = Directory::new(s);
  let hits = d
    .search_substring_by(ContactField::Email, "r%c", Page::default())
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Percy");
}

#[tokio::test]
async fn ping_succeeds() {
  store().await.ping().await.unwrap();
}

// ─── Directory: CRUD ─────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_returns_same_record() {
  let d = directory().await;
  let created = d.create(alice()).await.unwrap();

  let fetched = d.get(created.id).await.unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.name, "Alice");
  assert_eq!(fetched.birthday, date(1990, 6, 15));
}

#[tokio::test]
async fn create_defaults_missing_names_and_description() {
  let d = directory().await;
  let created = d
    .create(NewContact::new("anon@example.com", 77, date(2001, 1, 1)))
    .await
    .unwrap();
  assert_eq!(created.name, "Unknown");
  assert_eq!(created.last_name, "Unknown");
  assert_eq!(created.description, "-");
}

#[tokio::test]
async fn get_missing_is_not_found() {
  let d = directory().await;
  let err = d.get(999).await.unwrap_err();
  assert!(matches!(err, CoreError::ContactNotFound(999)), "{err}");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
  let d = directory().await;
  let created = d.create(alice()).await.unwrap();

  let deleted = d.delete(created.id).await.unwrap();
  assert_eq!(deleted, created);

  assert!(d.get(created.id).await.unwrap_err().is_not_found());
  assert!(d.delete(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn update_replaces_fields_but_keeps_birthday() {
  let d = directory().await;
  let created = d.create(alice()).await.unwrap();

  let updated = d
    .update(created.id, ContactUpdate {
      name:        "Alicia".into(),
      last_name:   "Pleasance".into(),
      email:       "alicia@example.com".into(),
      phone:       5559999,
      description: "renamed".into(),
    })
    .await
    .unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.name, "Alicia");
  assert_eq!(updated.last_name, "Pleasance");
  assert_eq!(updated.email, "alicia@example.com");
  assert_eq!(updated.phone, 5559999);
  assert_eq!(updated.description, "renamed");
  assert_eq!(updated.birthday, created.birthday);
  assert_eq!(d.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_missing_is_not_found_and_writes_nothing() {
  let d = directory().await;
  let existing = d.create(alice()).await.unwrap();

  let err = d
    .update(existing.id + 1, ContactUpdate {
      name:        "Ghost".into(),
      last_name:   "Writer".into(),
      email:       "ghost@example.com".into(),
      phone:       1,
      description: "-".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::ContactNotFound(_)), "{err}");

  let all = d.list(Page::default()).await.unwrap();
  assert_eq!(all, vec![existing]);
}

#[tokio::test]
async fn update_does_not_precheck_uniqueness_but_storage_rejects_collisions() {
  let d = directory().await;
  let a = d.create(alice()).await.unwrap();
  let b = d.create(bob()).await.unwrap();

  // Same name as Alice is accepted on update: only create checks names.
  let renamed = d
    .update(b.id, ContactUpdate {
      name:        a.name.clone(),
      last_name:   a.last_name.clone(),
      email:       b.email.clone(),
      phone:       b.phone,
      description: "-".into(),
    })
    .await
    .unwrap();
  assert_eq!(renamed.last_name, "Liddell");

  // Taking Alice's email trips the UNIQUE constraint instead.
  let err = d
    .update(b.id, ContactUpdate {
      name:        "Bob".into(),
      last_name:   "Smith".into(),
      email:       a.email.clone(),
      phone:       b.phone,
      description: "-".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(Duplicate::Constraint)), "{err}");
  assert_eq!(d.get(b.id).await.unwrap().email, "bob@example.com");
}

#[tokio::test]
async fn rename_changes_only_the_name() {
  let d = directory().await;
  let created = d.create(alice()).await.unwrap();

  let renamed = d.rename(created.id, "X").await.unwrap();
  assert_eq!(renamed.name, "X");
  assert_eq!(renamed.last_name, created.last_name);
  assert_eq!(renamed.email, created.email);
  assert_eq!(renamed.phone, created.phone);
  assert_eq!(renamed.birthday, created.birthday);
  assert_eq!(renamed.description, created.description);

  assert!(d.rename(created.id + 100, "Y").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn list_on_empty_store_is_empty() {
  let d = directory().await;
  assert!(d.list(Page::new(10, 0)).await.unwrap().is_empty());
  assert!(d.list(Page::new(10, 50)).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
  let d = directory().await;
  let mut ids = Vec::new();
  for i in 0..5 {
    let c = d
      .create(draft(&format!("Name{i}"), "Family", &format!("n{i}@example.com"), 100 + i))
      .await
      .unwrap();
    ids.push(c.id);
  }

  let page: Vec<i64> = d
    .list(Page::new(2, 1))
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(page, ids[1..3]);

  assert_eq!(d.list(Page::default()).await.unwrap().len(), 5);
}

// ─── Directory: uniqueness ───────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
  let d = directory().await;
  d.create(alice()).await.unwrap();

  let err = d
    .create(draft("Someone", "Else", "alice@example.com", 123))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(Duplicate::Email)), "{err}");
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
  let d = directory().await;
  d.create(alice()).await.unwrap();

  let err = d
    .create(draft("Someone", "Else", "else@example.com", 5550001))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(Duplicate::Phone)), "{err}");
}

#[tokio::test]
async fn duplicate_full_name_is_a_conflict() {
  let d = directory().await;
  d.create(alice()).await.unwrap();

  let err = d
    .create(draft("Alice", "Liddell", "other@example.com", 123))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(Duplicate::FullName)), "{err}");
  assert_eq!(d.list(Page::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn near_misses_are_accepted() {
  let d = directory().await;
  d.create(alice()).await.unwrap();

  // Same first name, different last name.
  d.create(draft("Alice", "Hargreaves", "a.h@example.com", 1001)).await.unwrap();
  // Same last name, different first name.
  d.create(draft("Lorina", "Liddell", "lorina@example.com", 1002)).await.unwrap();
  // Email differing only by a suffix.
  d.create(draft("Edith", "Liddell", "alice@example.com.au", 1003)).await.unwrap();

  assert_eq!(d.list(Page::default()).await.unwrap().len(), 4);
}

// ─── Directory: search ───────────────────────────────────────────────────────

#[tokio::test]
async fn exact_search_by_each_field() {
  let d = directory().await;
  let a = d.create(alice()).await.unwrap();
  let b = d.create(bob()).await.unwrap();

  assert_eq!(d.search_exact_by(Lookup::Name("Alice".into())).await.unwrap(), a);
  assert_eq!(d.search_exact_by(Lookup::LastName("Smith".into())).await.unwrap(), b);
  assert_eq!(d.search_exact_by(Lookup::Email("bob@example.com".into())).await.unwrap(), b);
  assert_eq!(d.search_exact_by(Lookup::Phone(5550001)).await.unwrap(), a);
}

#[tokio::test]
async fn exact_search_is_exact() {
  let d = directory().await;
  d.create(alice()).await.unwrap();

  assert!(d.search_exact_by(Lookup::Name("alice".into())).await.unwrap_err().is_not_found());
  assert!(d.search_exact_by(Lookup::Name("Ali".into())).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn exact_search_for_unknown_phone_is_not_found() {
  let d = directory().await;
  d.create(alice()).await.unwrap();

  let err = d.search_exact_by(Lookup::Phone(1234)).await.unwrap_err();
  assert!(matches!(err, CoreError::NoMatch(Lookup::Phone(1234))), "{err}");
}

#[tokio::test]
async fn exact_search_returns_first_match() {
  let d = directory().await;
  let first = d.create(draft("Sam", "Adams", "sam.a@example.com", 1)).await.unwrap();
  d.create(draft("Sam", "Brown", "sam.b@example.com", 2)).await.unwrap();

  assert_eq!(d.search_exact_by(Lookup::Name("Sam".into())).await.unwrap(), first);
}

#[tokio::test]
async fn substring_search_ignores_case() {
  let d = directory().await;
  let b = d.create(bob()).await.unwrap();
  d.create(alice()).await.unwrap();

  let hits = d
    .search_substring_by(ContactField::LastName, "SMI", Page::default())
    .await
    .unwrap();
  assert_eq!(hits, vec![b]);
}

#[tokio::test]
async fn substring_search_folds_non_ascii_case() {
  let d = directory().await;
  let denis = d.create(draft("Денис", "Петров", "denis@example.com", 7001)).await.unwrap();
  let emile = d.create(draft("Émile", "Zola", "emile@example.com", 7002)).await.unwrap();

  let hits = d
    .search_substring_by(ContactField::Name, "ДЕН", Page::default())
    .await
    .unwrap();
  assert_eq!(hits, vec![denis.clone()]);

  let hits = d
    .search_substring_by(ContactField::Name, "émi", Page::default())
    .await
    .unwrap();
  assert_eq!(hits, vec![emile]);

  let hits = d
    .search_substring_by(ContactField::LastName, "пЕТр", Page::default())
    .await
    .unwrap();
  assert_eq!(hits, vec![denis]);
}

#[tokio::test]
async fn substring_search_on_phone_digits() {
  let d = directory().await;
  let a = d.create(alice()).await.unwrap();
  let b = d.create(bob()).await.unwrap();

  let both = d
    .search_substring_by(ContactField::Phone, "555000", Page::default())
    .await
    .unwrap();
  assert_eq!(both, vec![a, b.clone()]);

  let one = d
    .search_substring_by(ContactField::Phone, "0002", Page::default())
    .await
    .unwrap();
  assert_eq!(one, vec![b]);
}

#[tokio::test]
async fn substring_search_pages_and_returns_empty_on_no_match() {
  let d = directory().await;
  for i in 0..4 {
    d.create(draft("Anna", &format!("Karenina{i}"), &format!("anna{i}@example.com"), 10 + i))
      .await
      .unwrap();
  }

  let page = d
    .search_substring_by(ContactField::Email, "ANNA", Page::new(2, 2))
    .await
    .unwrap();
  assert_eq!(page.len(), 2);
  assert_eq!(page[0].last_name, "Karenina2");

  let none = d
    .search_substring_by(ContactField::Name, "zzz", Page::default())
    .await
    .unwrap();
  assert!(none.is_empty());
}

// ─── Directory: birthdays ────────────────────────────────────────────────────

fn with_birthday(i: i64, birthday: NaiveDate) -> NewContact {
  NewContact::new(format!("b{i}@example.com"), 9000 + i, birthday)
    .with_name(format!("Person{i}"), "Birthday")
}

#[tokio::test]
async fn upcoming_birthdays_within_window() {
  let d = directory().await;
  let soon = d.create(with_birthday(1, date(1980, 3, 15))).await.unwrap();
  d.create(with_birthday(2, date(1980, 3, 1))).await.unwrap();
  let today_bday = d.create(with_birthday(3, date(1975, 3, 10))).await.unwrap();

  let hits = d
    .list_upcoming_birthdays_on(date(2024, 3, 10), 7, Page::default())
    .await
    .unwrap();
  assert_eq!(hits, vec![soon, today_bday]);
}

#[tokio::test]
async fn upcoming_birthdays_wrap_the_year() {
  let d = directory().await;
  let new_years_eve = d.create(with_birthday(1, date(1999, 12, 31))).await.unwrap();
  let early_jan = d.create(with_birthday(2, date(1999, 1, 2))).await.unwrap();
  d.create(with_birthday(3, date(1999, 1, 20))).await.unwrap();

  let hits = d
    .list_upcoming_birthdays_on(date(2024, 12, 28), 7, Page::default())
    .await
    .unwrap();
  assert_eq!(hits, vec![new_years_eve, early_jan]);
}

#[tokio::test]
async fn upcoming_birthdays_paginate_after_filtering() {
  let d = directory().await;
  let today = date(2024, 3, 10);
  let mut qualifying = Vec::new();
  // Interleave non-qualifying contacts so a pre-filter slice would differ.
  for i in 0..12 {
    let hit = d.create(with_birthday(i * 2, date(1990, 3, 12))).await.unwrap();
    qualifying.push(hit.id);
    d.create(with_birthday(i * 2 + 1, date(1990, 9, 1))).await.unwrap();
  }

  let page: Vec<i64> = d
    .list_upcoming_birthdays_on(today, 7, Page::new(5, 5))
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(page, qualifying[5..10]);
}

#[tokio::test]
async fn upcoming_birthdays_on_empty_store_is_empty() {
  let d = directory().await;
  assert!(d.list_upcoming_birthdays(30, Page::default()).await.unwrap().is_empty());
}
