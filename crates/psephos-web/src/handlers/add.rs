//! `POST /add`: score and upsert free-text words, then redirect back.

use axum::{
  Form,
  extract::{RawQuery, State, rejection::FormRejection},
  http::header,
  response::{IntoResponse, Redirect, Response},
};
use psephos_core::{store::CatalogStore, word::split_words};
use serde::Deserialize;

use crate::{AppState, error::Error, flash::Flash, query::QueryString};

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
  /// Words separated by commas and/or whitespace.
  #[serde(default)]
  pub words: String,
}

/// Redirects (303) to the listing with the caller's query string intact and
/// a flash notice describing the outcome. A body that is not a form counts
/// as an empty submission.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  RawQuery(raw): RawQuery,
  form: Result<Form<AddForm>, FormRejection>,
) -> Result<Response, Error>
where
  S: CatalogStore + Clone + 'static,
{
  let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
    tracing::debug!(%rejection, "unreadable add form");
    AddForm::default()
  });
  let text = form.words.trim();

  let flash = if text.is_empty() {
    Flash::NoWords
  } else {
    let words = split_words(text);
    if words.is_empty() {
      Flash::NoValidWords
    } else {
      let submitted = words.len();
      let changed = state.store.upsert_batch(words).await.map_err(Error::store)?;
      tracing::info!(submitted, changed, "added words");
      Flash::Added(changed)
    }
  };

  let location = QueryString::parse(raw.as_deref()).without("ajax").url("/");
  let mut res = Redirect::to(&location).into_response();
  res.headers_mut().append(header::SET_COOKIE, flash.set_cookie());
  Ok(res)
}
