//! `GET /export.csv`: every row matching the current filters as CSV.

use axum::{
  extract::{Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use psephos_core::{filter::FilterParams, store::CatalogStore};

use crate::{
  AppState, csv,
  error::Error,
  etag::{compute_etag, if_none_match},
};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: CatalogStore + Clone + 'static,
{
  let filter = FilterParams::from_pairs(pairs);
  let rows = state
    .store
    .export(&filter.predicate())
    .await
    .map_err(Error::store)?;
  let body = csv::encode(&rows);
  let etag = compute_etag(body.as_bytes());

  let unchanged = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| if_none_match(v, &etag));
  if unchanged {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  tracing::info!(rows = rows.len(), "exported words");
  Ok(
    (
      [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
          header::CONTENT_DISPOSITION,
          "attachment; filename=\"export.csv\"".to_string(),
        ),
        (header::ETAG, etag),
      ],
      body,
    )
      .into_response(),
  )
}
