//! Core types and the directory service for the Rolodex contact store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ContactStore`]; transports drive a
//! [`directory::Directory`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod birthday;
pub mod contact;
pub mod directory;
pub mod error;
pub mod store;

pub use directory::Directory;
pub use error::{Duplicate, Error, Result};
