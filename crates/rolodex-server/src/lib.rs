//! HTTP server assembly for Rolodex.
//!
//! Loads [`ServerConfig`], and wraps [`rolodex_api::api_router`] under `/api`
//! with request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use rolodex_core::{Directory, store::ContactStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROLODEX_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8000,
      database_path: PathBuf::from("rolodex.db"),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `ROLODEX_*` environment
  /// variables. Missing keys fall back to [`ServerConfig::default`].
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROLODEX"))
      .build()?
      .try_deserialize()
  }

  /// `host:port`, ready for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The database path with a leading `~` expanded to the home directory.
  pub fn resolved_database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API nested under `/api`, with a
/// `tower-http` trace span per request.
pub fn app<S>(directory: Arc<Directory<S>>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .nest("/api", rolodex_api::api_router(directory))
    .layer(TraceLayer::new_for_http())
}
