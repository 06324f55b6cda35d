//! Web interface for the psephos word catalog.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Listing; `ajax=1` returns only the table fragment |
//! | `POST` | `/add` | Form field `words`; redirects back to the listing |
//! | `POST` | `/delete/{id}` | Returns `{"ok": true}` |
//! | `GET`  | `/export.csv` | Filtered CSV download |

pub mod config;
pub mod csv;
pub mod error;
pub mod etag;
pub mod flash;
pub mod handlers;
pub mod query;
pub mod render;

pub use config::ServerConfig;
pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use psephos_core::store::CatalogStore;
use tower_http::trace::TraceLayer;

use handlers::{add, delete, export, list};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the catalog.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + 'static,
{
  Router::new()
    .route("/", get(list::handler::<S>))
    .route("/add", post(add::handler::<S>))
    .route("/delete/{id}", post(delete::handler::<S>))
    .route("/export.csv", get(export::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
