//! SQL schema for the psephos SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS words (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    word       TEXT    NOT NULL UNIQUE,   -- upper-cased
    n1         INTEGER NOT NULL,
    n2         INTEGER NOT NULL,
    n3         INTEGER NOT NULL,
    n4         INTEGER NOT NULL,
    n5         INTEGER NOT NULL,
    n6         INTEGER NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_words_word ON words(word);
CREATE INDEX IF NOT EXISTS idx_words_n1   ON words(n1);
CREATE INDEX IF NOT EXISTS idx_words_n2   ON words(n2);
CREATE INDEX IF NOT EXISTS idx_words_n3   ON words(n3);
CREATE INDEX IF NOT EXISTS idx_words_n4   ON words(n4);
CREATE INDEX IF NOT EXISTS idx_words_n5   ON words(n5);
CREATE INDEX IF NOT EXISTS idx_words_n6   ON words(n6);

PRAGMA user_version = 1;
";

/// Insert a word, or refresh the scores of an existing one. `created_at` is
/// never touched by the update branch.
pub const UPSERT: &str = "
INSERT INTO words (word, n1, n2, n3, n4, n5, n6, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(word) DO UPDATE SET
  n1 = excluded.n1, n2 = excluded.n2, n3 = excluded.n3,
  n4 = excluded.n4, n5 = excluded.n5, n6 = excluded.n6
";
