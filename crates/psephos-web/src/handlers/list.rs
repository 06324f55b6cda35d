//! `GET /`: paginated, sorted, filtered listing.

use axum::{
  extract::{Query, RawQuery, State},
  http::{HeaderMap, header},
  response::{Html, IntoResponse, Response},
};
use psephos_core::{
  filter::FilterParams,
  store::{CatalogStore, PageQuery, Pagination, SortDirection, SortField},
};

use crate::{
  AppState,
  error::Error,
  flash::Flash,
  query::QueryString,
  render::{self, ListView},
};

/// Listing parameters other than filters. Values stay raw strings so that
/// malformed input falls back to defaults instead of failing extraction.
#[derive(Debug, Default)]
pub struct ListParams {
  pub page:     Option<String>,
  pub per_page: Option<String>,
  pub sort:     Option<String>,
  pub dir:      Option<String>,
  /// `1` renders only the table fragment.
  pub ajax:     Option<String>,
}

impl ListParams {
  /// Collect the listing keys from decoded query pairs. The first value of a
  /// repeated key wins.
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    let mut params = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "page" => &mut params.page,
        "per_page" => &mut params.per_page,
        "sort" => &mut params.sort,
        "dir" => &mut params.dir,
        "ajax" => &mut params.ajax,
        _ => continue,
      };
      slot.get_or_insert_with(|| value.clone());
    }
    params
  }
}

/// `GET /?page&per_page&q&n{i}&n{i}_min&n{i}_max&sort&dir&ajax`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
  RawQuery(raw): RawQuery,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: CatalogStore + Clone + 'static,
{
  let params = ListParams::from_pairs(&pairs);
  let filter = FilterParams::from_pairs(pairs);

  let query = PageQuery {
    predicate:  filter.predicate(),
    sort:       SortField::from_param(params.sort.as_deref()),
    direction:  SortDirection::from_param(params.dir.as_deref()),
    pagination: Pagination::from_params(
      params.page.as_deref(),
      params.per_page.as_deref(),
    ),
  };

  let total = state.store.count(&query.predicate).await.map_err(Error::store)?;
  let rows = state.store.page(&query).await.map_err(Error::store)?;
  tracing::debug!(
    total,
    page = query.pagination.page(),
    shown = rows.len(),
    "listed words"
  );

  let current = QueryString::parse(raw.as_deref()).without("ajax");
  let mut view = ListView {
    rows: &rows,
    total,
    pagination: query.pagination,
    sort: query.sort,
    direction: query.direction,
    query: &current,
    filter: &filter,
    flash: None,
  };

  if params.ajax.as_deref() == Some("1") {
    return Ok(Html(render::fragment(&view)).into_response());
  }

  view.flash = Flash::from_headers(&headers);
  let mut res = Html(render::page(&view)).into_response();
  if view.flash.is_some() {
    res.headers_mut().append(header::SET_COOKIE, Flash::clear_cookie());
  }
  Ok(res)
}
