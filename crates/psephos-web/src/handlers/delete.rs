//! `POST /delete/{id}`: remove one word. Unknown ids are not an error.

use axum::{
  Json,
  extract::{Path, State},
};
use psephos_core::store::CatalogStore;
use serde_json::{Value, json};

use crate::{AppState, error::Error};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, Error>
where
  S: CatalogStore + Clone + 'static,
{
  let removed = state.store.delete(id).await.map_err(Error::store)?;
  tracing::info!(id, removed, "deleted word");
  Ok(Json(json!({ "ok": true })))
}
