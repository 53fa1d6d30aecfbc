//! The rolling birthday window.
//!
//! A birthday is "upcoming" when its next occurrence, counted from `today`
//! and rolling over into next year once this year's date has passed, is at
//! most `window_days` away. A birthday that falls on `today` is 0 days away.

use chrono::{Datelike, NaiveDate};

/// The date `birthday` is observed in `year`. A Feb 29 birthday is observed
/// on Feb 28 in non-leap years.
pub fn occurrence_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
    .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

/// The first observed birthday on or after `today`.
pub fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
  let this_year = occurrence_in(birthday, today.year())?;
  if this_year >= today {
    Some(this_year)
  } else {
    occurrence_in(birthday, today.year() + 1)
  }
}

/// Whole days from `today` until the next birthday.
pub fn days_until_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<i64> {
  next_occurrence(birthday, today).map(|next| (next - today).num_days())
}

/// Whether the next birthday is at most `window_days` away (inclusive).
pub fn is_within_window(birthday: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
  days_until_birthday(birthday, today).is_some_and(|days| days <= i64::from(window_days))
}
