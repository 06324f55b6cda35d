//! Bulk import of tab-separated word lists into a [`CatalogStore`].
//!
//! Each line's first tab-delimited field is a candidate word; everything
//! after the first tab is ignored. Words are scored and upserted in batches,
//! with one commit per batch, so an interrupted import loses at most one
//! batch of work.

use std::path::Path;

use psephos_core::{NewWord, store::CatalogStore};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt as _, BufReader};

/// Default number of rows per committed batch.
pub const DEFAULT_BATCH_SIZE: usize = 2000;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read dataset: {0}")]
  Io(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
  /// Rows submitted to the store across all committed batches.
  pub committed:      usize,
  /// Lines whose first field was blank.
  pub skipped_blank:  usize,
  /// The dataset file did not exist; nothing was imported.
  pub source_missing: bool,
}

/// The candidate word on one dataset line, if any.
fn candidate(line: &str) -> Option<&str> {
  let first = line.split('\t').next().unwrap_or_default().trim();
  (!first.is_empty()).then_some(first)
}

/// Import the dataset at `path` into `store`, committing every `batch_size`
/// words. A missing file is reported, not treated as an error.
pub async fn import_dataset<S>(
  store: &S,
  path: &Path,
  batch_size: usize,
) -> Result<ImportReport>
where
  S: CatalogStore,
{
  let batch_size = batch_size.max(1);
  let mut report = ImportReport::default();

  let file = match tokio::fs::File::open(path).await {
    Ok(f) => f,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      tracing::info!(path = %path.display(), "no dataset found; skipping import");
      report.source_missing = true;
      return Ok(report);
    }
    Err(e) => return Err(e.into()),
  };

  let mut lines = BufReader::new(file).lines();
  let mut batch = Vec::with_capacity(batch_size);
  let mut first_line = true;

  while let Some(line) = lines.next_line().await? {
    let line = if first_line {
      first_line = false;
      line.trim_start_matches('\u{feff}').to_owned()
    } else {
      line
    };

    match candidate(&line).and_then(NewWord::new) {
      Some(word) => batch.push(word),
      None => {
        report.skipped_blank += 1;
        continue;
      }
    }

    if batch.len() >= batch_size {
      report.committed += commit(store, &mut batch).await?;
      tracing::info!(committed = report.committed, "committed batch");
    }
  }

  if !batch.is_empty() {
    let n = commit(store, &mut batch).await?;
    report.committed += n;
    tracing::info!(
      batch = n,
      committed = report.committed,
      "committed final batch"
    );
  }

  Ok(report)
}

async fn commit<S: CatalogStore>(
  store: &S,
  batch: &mut Vec<NewWord>,
) -> Result<usize> {
  let words = std::mem::take(batch);
  let n = words.len();
  store
    .upsert_batch(words)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(n)
}
