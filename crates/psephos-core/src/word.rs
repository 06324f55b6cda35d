//! Word records, the sole entity of the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Scores, calculate, normalize_word};

/// A normalized word paired with freshly computed scores, ready to upsert.
///
/// The only way to build one is from raw text, so the scores always match
/// the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWord {
  word:   String,
  scores: Scores,
}

impl NewWord {
  /// Normalize and score `raw`. Returns `None` if nothing is left after
  /// trimming.
  pub fn new(raw: &str) -> Option<Self> {
    let word = normalize_word(raw);
    if word.is_empty() {
      return None;
    }
    let scores = calculate(&word);
    Some(Self { word, scores })
  }

  pub fn word(&self) -> &str { &self.word }

  pub fn scores(&self) -> Scores { self.scores }
}

/// Split free text on commas and whitespace into scored words.
pub fn split_words(text: &str) -> Vec<NewWord> {
  text
    .split(|c: char| c == ',' || c.is_whitespace())
    .filter_map(NewWord::new)
    .collect()
}

/// A stored catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
  pub id:         i64,
  pub word:       String,
  pub scores:     Scores,
  pub created_at: DateTime<Utc>,
}

/// The export projection of a row: the word and its scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScores {
  pub word:   String,
  pub scores: Scores,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_word_normalizes() {
    let w = NewWord::new("  λογος ").unwrap();
    assert_eq!(w.word(), "ΛΟΓΟΣ");
    assert_eq!(w.scores(), calculate("ΛΟΓΟΣ"));
  }

  #[test]
  fn blank_is_rejected() {
    assert!(NewWord::new("").is_none());
    assert!(NewWord::new(" \t ").is_none());
  }

  #[test]
  fn split_on_commas_and_whitespace() {
    let words = split_words("αγαπη, λογος,,θεος\nψυχη   ");
    let words: Vec<_> = words.iter().map(NewWord::word).collect();
    assert_eq!(words, ["ΑΓΑΠΗ", "ΛΟΓΟΣ", "ΘΕΟΣ", "ΨΥΧΗ"]);
  }

  #[test]
  fn split_nothing_usable() {
    assert!(split_words(" , ,\n").is_empty());
  }
}
