//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `psephos-store-sqlite`).
//! Higher layers (`psephos-import`, `psephos-web`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  filter::{Predicate, ScoreField},
  word::{NewWord, WordRecord, WordScores},
};

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Columns a listing may be ordered by.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
  #[default]
  Word,
  N1,
  N2,
  N3,
  N4,
  N5,
  N6,
}

impl SortField {
  /// Parse a requested sort column, falling back to [`SortField::Word`] for
  /// anything outside the allow-list.
  pub fn from_param(raw: Option<&str>) -> Self {
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
  }

  /// Column name, e.g. `"word"`.
  pub fn column(self) -> &'static str { self.into() }
}

impl From<ScoreField> for SortField {
  fn from(field: ScoreField) -> Self {
    match field {
      ScoreField::N1 => SortField::N1,
      ScoreField::N2 => SortField::N2,
      ScoreField::N3 => SortField::N3,
      ScoreField::N4 => SortField::N4,
      ScoreField::N5 => SortField::N5,
      ScoreField::N6 => SortField::N6,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl SortDirection {
  /// Parse a requested direction, falling back to ascending.
  pub fn from_param(raw: Option<&str>) -> Self {
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
  }

  pub fn flipped(self) -> Self {
    match self {
      SortDirection::Asc => SortDirection::Desc,
      SortDirection::Desc => SortDirection::Asc,
    }
  }
}

// ─── Pagination ──────────────────────────────────────────────────────────────

pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 500;

/// A 1-based page number and a page size, both already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
  page:     u32,
  per_page: u32,
}

impl Default for Pagination {
  fn default() -> Self { Self { page: 1, per_page: DEFAULT_PER_PAGE } }
}

impl Pagination {
  /// Clamp `page` to at least 1 and `per_page` into `[1, MAX_PER_PAGE]`.
  pub fn new(page: i64, per_page: i64) -> Self {
    Self {
      page:     page.clamp(1, i64::from(u32::MAX)) as u32,
      per_page: per_page.clamp(1, i64::from(MAX_PER_PAGE)) as u32,
    }
  }

  /// Build from raw query values. Missing or malformed values take the
  /// defaults (page 1, [`DEFAULT_PER_PAGE`]).
  pub fn from_params(page: Option<&str>, per_page: Option<&str>) -> Self {
    let parse = |raw: Option<&str>, default: u32| {
      raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(i64::from(default))
    };
    Self::new(parse(page, 1), parse(per_page, DEFAULT_PER_PAGE))
  }

  pub fn page(&self) -> u32 { self.page }

  pub fn limit(&self) -> u32 { self.per_page }

  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.per_page)
  }

  /// Number of pages needed for `total` rows; at least 1.
  pub fn page_count(&self, total: u64) -> u64 {
    total.div_ceil(u64::from(self.per_page)).max(1)
  }
}

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CatalogStore::page`].
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
  pub predicate:  Predicate,
  pub sort:       SortField,
  pub direction:  SortDirection,
  pub pagination: Pagination,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a catalog store backend.
///
/// Words are unique after normalization. Every write recomputes the scores
/// from the word, so there is no way to store stale values.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `word`, or overwrite the scores of the existing row with the same
  /// word. `created_at` is only set on insert. Returns whether a row changed.
  fn upsert(
    &self,
    word: NewWord,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Upsert every word in one transaction. Returns the number of rows
  /// changed.
  fn upsert_batch(
    &self,
    words: Vec<NewWord>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Delete the row with `id`. Returns `false` (not an error) if absent.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Look up a row by word. The input is normalized first.
  fn get_by_word<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Result<Option<WordRecord>, Self::Error>> + Send + 'a;

  /// Number of rows matching `predicate`.
  fn count<'a>(
    &'a self,
    predicate: &'a Predicate,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// One sorted page of rows matching `query.predicate`.
  fn page<'a>(
    &'a self,
    query: &'a PageQuery,
  ) -> impl Future<Output = Result<Vec<WordRecord>, Self::Error>> + Send + 'a;

  /// Every row matching `predicate`, ordered by word ascending.
  fn export<'a>(
    &'a self,
    predicate: &'a Predicate,
  ) -> impl Future<Output = Result<Vec<WordScores>, Self::Error>> + Send + 'a;
}
