//! Integration tests for `SqliteStore` against an in-memory database.

use psephos_core::{
  NewWord, calculate,
  filter::{FilterParams, Predicate},
  store::{CatalogStore, PageQuery, Pagination, SortDirection, SortField},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn word(raw: &str) -> NewWord { NewWord::new(raw).expect("non-blank word") }

async fn seeded(words: &[&str]) -> SqliteStore {
  let s = store().await;
  s.upsert_batch(words.iter().map(|w| word(w)).collect())
    .await
    .unwrap();
  s
}

fn filter(f: impl FnOnce(&mut FilterParams)) -> Predicate {
  let mut params = FilterParams::default();
  f(&mut params);
  params.predicate()
}

fn words_of(records: &[psephos_core::WordRecord]) -> Vec<&str> {
  records.iter().map(|r| r.word.as_str()).collect()
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_then_read_back_matches_calculate() {
  let s = store().await;
  assert!(s.upsert(word("αγαπη")).await.unwrap());

  let rec = s.get_by_word("ΑΓΑΠΗ").await.unwrap().unwrap();
  assert_eq!(rec.word, "ΑΓΑΠΗ");
  assert_eq!(rec.scores, calculate("ΑΓΑΠΗ"));
}

#[tokio::test]
async fn get_by_word_missing_returns_none() {
  let s = store().await;
  assert!(s.get_by_word("ΛΟΓΟΣ").await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_is_case_insensitive() {
  let s = store().await;
  s.upsert(word("λογοσ")).await.unwrap();
  s.upsert(word("ΛΟΓΟΣ")).await.unwrap();
  s.upsert(word("  Λογοσ ")).await.unwrap();

  assert_eq!(s.count(&Predicate::all()).await.unwrap(), 1);
}

#[tokio::test]
async fn upsert_preserves_id_and_created_at() {
  let s = store().await;
  s.upsert(word("ΘΕΟΣ")).await.unwrap();
  let first = s.get_by_word("ΘΕΟΣ").await.unwrap().unwrap();

  s.upsert(word("θεος")).await.unwrap();
  let second = s.get_by_word("ΘΕΟΣ").await.unwrap().unwrap();

  assert_eq!(first.id, second.id);
  assert_eq!(first.created_at, second.created_at);
  assert_eq!(second.scores, calculate("ΘΕΟΣ"));
}

#[tokio::test]
async fn upsert_batch_counts_and_dedupes() {
  let s = store().await;
  let changed = s
    .upsert_batch(vec![word("ΑΓΑΠΗ"), word("ΛΟΓΟΣ"), word("αγαπη")])
    .await
    .unwrap();
  assert_eq!(changed, 3);
  assert_eq!(s.count(&Predicate::all()).await.unwrap(), 2);
}

#[tokio::test]
async fn upsert_batch_empty_is_noop() {
  let s = store().await;
  assert_eq!(s.upsert_batch(vec![]).await.unwrap(), 0);
}

#[tokio::test]
async fn scores_are_refreshed_on_conflict() {
  let s = store().await;
  s.upsert(word("ΨΥΧΗ")).await.unwrap();
  let id = s.get_by_word("ΨΥΧΗ").await.unwrap().unwrap().id;

  // Corrupt the stored scores behind the store's back, then upsert again.
  s.conn
    .call(move |conn| {
      conn.execute("UPDATE words SET n1 = 0, n6 = 0 WHERE id = ?1", [id])?;
      Ok(())
    })
    .await
    .unwrap();

  s.upsert(word("ψυχη")).await.unwrap();
  let rec = s.get_by_word("ΨΥΧΗ").await.unwrap().unwrap();
  assert_eq!(rec.scores, calculate("ΨΥΧΗ"));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = seeded(&["ΑΓΑΠΗ", "ΛΟΓΟΣ"]).await;
  let id = s.get_by_word("ΑΓΑΠΗ").await.unwrap().unwrap().id;

  assert!(s.delete(id).await.unwrap());
  assert!(s.get_by_word("ΑΓΑΠΗ").await.unwrap().is_none());
  assert_eq!(s.count(&Predicate::all()).await.unwrap(), 1);
}

#[tokio::test]
async fn delete_missing_is_noop() {
  let s = seeded(&["ΑΓΑΠΗ"]).await;
  assert!(!s.delete(9_999).await.unwrap());
  assert!(!s.delete(-1).await.unwrap());
  assert_eq!(s.count(&Predicate::all()).await.unwrap(), 1);
}

// ─── Count / filter ──────────────────────────────────────────────────────────

#[tokio::test]
async fn count_with_text_filter() {
  let s = seeded(&["ΑΓΑΠΗ", "ΑΓΙΟΣ", "ΛΟΓΟΣ", "ΜΑΓΟΣ"]).await;

  let p = filter(|f| f.q = Some("αγ".into()));
  assert_eq!(s.count(&p).await.unwrap(), 3);

  let p = filter(|f| f.q = Some("ΟΣ".into()));
  assert_eq!(s.count(&p).await.unwrap(), 3);
}

#[tokio::test]
async fn count_with_numeric_filters() {
  // ΑΓΑΠΗ n1=9, ΛΟΓΟΣ n1=12, ΘΕΟΣ n1=11
  let s = seeded(&["ΑΓΑΠΗ", "ΛΟΓΟΣ", "ΘΕΟΣ"]).await;

  let p = filter(|f| f.n1 = Some("9".into()));
  assert_eq!(s.count(&p).await.unwrap(), 1);

  let p = filter(|f| {
    f.n1_min = Some("10".into());
    f.n1_max = Some("12".into());
  });
  assert_eq!(s.count(&p).await.unwrap(), 2);

  // Equal bounds widen to [11, 12].
  let p = filter(|f| {
    f.n1_min = Some("11".into());
    f.n1_max = Some("11".into());
  });
  assert_eq!(s.count(&p).await.unwrap(), 2);

  // Exact wins over contradictory bounds.
  let p = filter(|f| {
    f.n1 = Some("9".into());
    f.n1_min = Some("100".into());
  });
  assert_eq!(s.count(&p).await.unwrap(), 1);
}

// ─── Page ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn page_sorts_and_slices() {
  let s = seeded(&["ΓΑΜΜΑ", "ΑΛΦΑ", "ΔΕΛΤΑ", "ΒΗΤΑ"]).await;

  let query = PageQuery {
    pagination: Pagination::new(1, 2),
    ..Default::default()
  };
  let rows = s.page(&query).await.unwrap();
  assert_eq!(words_of(&rows), ["ΑΛΦΑ", "ΒΗΤΑ"]);

  let query = PageQuery {
    pagination: Pagination::new(2, 2),
    ..Default::default()
  };
  let rows = s.page(&query).await.unwrap();
  assert_eq!(words_of(&rows), ["ΓΑΜΜΑ", "ΔΕΛΤΑ"]);

  let query = PageQuery {
    pagination: Pagination::new(3, 2),
    ..Default::default()
  };
  assert!(s.page(&query).await.unwrap().is_empty());
}

#[tokio::test]
async fn page_sorts_descending_by_score() {
  let s = seeded(&["ΑΓΑΠΗ", "ΛΟΓΟΣ", "ΘΕΟΣ"]).await;

  let query = PageQuery {
    sort: SortField::N1,
    direction: SortDirection::Desc,
    ..Default::default()
  };
  let rows = s.page(&query).await.unwrap();
  assert_eq!(words_of(&rows), ["ΛΟΓΟΣ", "ΘΕΟΣ", "ΑΓΑΠΗ"]);
  assert!(rows.windows(2).all(|w| w[0].scores.n1 >= w[1].scores.n1));
}

#[tokio::test]
async fn page_applies_predicate() {
  let s = seeded(&["ΑΓΑΠΗ", "ΑΓΙΟΣ", "ΛΟΓΟΣ"]).await;

  let query = PageQuery {
    predicate: filter(|f| f.q = Some("αγ".into())),
    direction: SortDirection::Desc,
    ..Default::default()
  };
  let rows = s.page(&query).await.unwrap();
  assert_eq!(words_of(&rows), ["ΑΓΙΟΣ", "ΑΓΑΠΗ"]);
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn export_filters_and_sorts_by_word() {
  let s = seeded(&["ΜΑΓΟΣ", "ΛΟΓΟΣ", "ΑΓΑΠΗ", "ΑΓΙΟΣ"]).await;

  let rows = s.export(&filter(|f| f.q = Some("αγ".into()))).await.unwrap();
  let words: Vec<_> = rows.iter().map(|r| r.word.as_str()).collect();
  assert_eq!(words, ["ΑΓΑΠΗ", "ΑΓΙΟΣ", "ΜΑΓΟΣ"]);
  assert!(rows.iter().all(|r| r.scores == calculate(&r.word)));
}

#[tokio::test]
async fn export_everything() {
  let s = seeded(&["ΒΗΤΑ", "ΑΛΦΑ"]).await;
  let rows = s.export(&Predicate::all()).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].word, "ΑΛΦΑ");
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_survives_reopen() {
  let dir = std::env::temp_dir().join(format!(
    "psephos-store-{}-{}",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));
  let path = dir.join("nested").join("data.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert(word("ΑΓΑΠΗ")).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let rec = s.get_by_word("ΑΓΑΠΗ").await.unwrap().unwrap();
  assert_eq!(rec.scores, calculate("ΑΓΑΠΗ"));

  let _ = std::fs::remove_dir_all(&dir);
}
