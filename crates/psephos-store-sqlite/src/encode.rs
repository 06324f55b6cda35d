//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are written as RFC 3339 strings. Rows created by SQLite's own
//! `CURRENT_TIMESTAMP` default (`YYYY-MM-DD HH:MM:SS`, UTC) also decode.

use chrono::{DateTime, NaiveDateTime, Utc};
use psephos_core::{
  Scores,
  filter::{BoundValue, Clause, Predicate},
  store::{SortDirection, SortField},
  word::{WordRecord, WordScores},
};
use rusqlite::types::Value;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|naive| naive.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Predicate ───────────────────────────────────────────────────────────────

/// Render `predicate` as a ` WHERE ...` suffix (empty when it matches all
/// rows) together with its positional parameters.
pub fn encode_predicate(predicate: &Predicate) -> (String, Vec<Value>) {
  if predicate.is_empty() {
    return (String::new(), Vec::new());
  }

  let conds: Vec<String> = predicate
    .clauses()
    .iter()
    .map(|clause| match clause {
      Clause::WordContains(_) => "word LIKE ?".to_owned(),
      Clause::Eq(field, _) => format!("{} = ?", field.column()),
      Clause::AtLeast(field, _) => format!("{} >= ?", field.column()),
      Clause::AtMost(field, _) => format!("{} <= ?", field.column()),
    })
    .collect();

  let params = predicate
    .bound_values()
    .into_iter()
    .map(|v| match v {
      BoundValue::Text(s) => Value::Text(s),
      BoundValue::Int(n) => Value::Integer(i64::from(n)),
    })
    .collect();

  (format!(" WHERE {}", conds.join(" AND ")), params)
}

/// `ORDER BY` body for a listing. Score columns tie-break on the word so
/// that pages are stable.
pub fn encode_order(sort: SortField, direction: SortDirection) -> String {
  let dir = match direction {
    SortDirection::Asc => "ASC",
    SortDirection::Desc => "DESC",
  };
  match sort {
    SortField::Word => format!("word {dir}"),
    other => format!("{} {dir}, word ASC", other.column()),
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

pub const RECORD_COLUMNS: &str = "id, word, n1, n2, n3, n4, n5, n6, created_at";

/// A `words` row as read from SQLite, before timestamp decoding.
pub struct RawRecord {
  pub id:         i64,
  pub word:       String,
  pub scores:     Scores,
  pub created_at: Option<String>,
}

impl RawRecord {
  /// Read a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      word:       row.get(1)?,
      scores:     scores_at(row, 2)?,
      created_at: row.get(8)?,
    })
  }

  pub fn into_record(self) -> Result<WordRecord> {
    let created_at = match self.created_at.as_deref() {
      Some(s) => decode_dt(s)?,
      None => DateTime::<Utc>::UNIX_EPOCH,
    };
    Ok(WordRecord {
      id: self.id,
      word: self.word,
      scores: self.scores,
      created_at,
    })
  }
}

/// Read a row selected as `word, n1, ..., n6`.
pub fn word_scores_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WordScores> {
  Ok(WordScores { word: row.get(0)?, scores: scores_at(row, 1)? })
}

/// Read six consecutive score columns starting at `first`.
fn scores_at(row: &rusqlite::Row<'_>, first: usize) -> rusqlite::Result<Scores> {
  Ok(Scores {
    n1: row.get(first)?,
    n2: row.get(first + 1)?,
    n3: row.get(first + 2)?,
    n4: row.get(first + 3)?,
    n5: row.get(first + 4)?,
    n6: row.get(first + 5)?,
  })
}
