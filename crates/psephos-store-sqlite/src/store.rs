//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use psephos_core::{
  NewWord, WordRecord, WordScores,
  filter::Predicate,
  normalize_word,
  store::{CatalogStore, PageQuery},
};
use rusqlite::{OptionalExtension as _, types::Value};

use crate::{
  Result,
  encode::{
    RECORD_COLUMNS, RawRecord, encode_dt, encode_order, encode_predicate,
    word_scores_from_row,
  },
  schema::{SCHEMA, UPSERT},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A word catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every call
/// borrows the connection for the duration of one closure, so it is released
/// on every exit path, errors included.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn execute_upsert(
  stmt: &mut rusqlite::CachedStatement<'_>,
  word: &NewWord,
  now: &str,
) -> rusqlite::Result<usize> {
  let s = word.scores();
  stmt.execute(rusqlite::params![
    word.word(),
    s.n1,
    s.n2,
    s.n3,
    s.n4,
    s.n5,
    s.n6,
    now,
  ])
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn upsert(&self, word: NewWord) -> Result<bool> {
    let now = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(UPSERT)?;
        Ok(execute_upsert(&mut stmt, &word, &now)?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn upsert_batch(&self, words: Vec<NewWord>) -> Result<usize> {
    if words.is_empty() {
      return Ok(0);
    }
    let now = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut changed = 0;
        {
          let mut stmt = tx.prepare_cached(UPSERT)?;
          for word in &words {
            changed += execute_upsert(&mut stmt, word, &now)?;
          }
        }
        tx.commit()?;
        Ok(changed)
      })
      .await?;

    Ok(changed)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM words WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if removed == 0 {
      tracing::debug!(id, "delete of unknown word id ignored");
    }
    Ok(removed > 0)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_by_word(&self, word: &str) -> Result<Option<WordRecord>> {
    let word = normalize_word(word);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECORD_COLUMNS} FROM words WHERE word = ?1"),
              rusqlite::params![word],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn count(&self, predicate: &Predicate) -> Result<u64> {
    let (where_clause, params) = encode_predicate(predicate);

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!("SELECT COUNT(*) FROM words{where_clause}"),
          rusqlite::params_from_iter(params.iter()),
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count.max(0) as u64)
  }

  async fn page(&self, query: &PageQuery) -> Result<Vec<WordRecord>> {
    let (where_clause, mut params) = encode_predicate(&query.predicate);
    let order = encode_order(query.sort, query.direction);
    params.push(Value::Integer(i64::from(query.pagination.limit())));
    params.push(Value::Integer(
      i64::try_from(query.pagination.offset()).unwrap_or(i64::MAX),
    ));

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM words{where_clause}
           ORDER BY {order}
           LIMIT ? OFFSET ?"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn export(&self, predicate: &Predicate) -> Result<Vec<WordScores>> {
    let (where_clause, params) = encode_predicate(predicate);

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT word, n1, n2, n3, n4, n5, n6 FROM words{where_clause}
           ORDER BY word ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), word_scores_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
