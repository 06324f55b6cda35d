//! The scoring engine: maps a word to six numbers using fixed letter tables.
//!
//! Vowels feed `n1`, consonants feed `n3`, and the whole alphabet feeds `n5`.
//! Each even field is the digit reduction of the field before it.

use serde::{Deserialize, Serialize};

/// Letter values for vowels.
pub const VOWELS: &[(char, u32)] = &[
  ('Α', 1),
  ('Ε', 5),
  ('Η', 7),
  ('Ι', 9),
  ('Ο', 6),
  ('Υ', 2),
  ('Ω', 6),
];

/// Letter values for consonants. Disjoint from [`VOWELS`].
pub const CONSONANTS: &[(char, u32)] = &[
  ('Β', 2),
  ('Γ', 3),
  ('Δ', 4),
  ('Ζ', 6),
  ('Θ', 8),
  ('Κ', 1),
  ('Λ', 2),
  ('Μ', 3),
  ('Ν', 4),
  ('Ξ', 5),
  ('Π', 7),
  ('Ρ', 8),
  ('Σ', 9),
  ('Τ', 1),
  ('Φ', 3),
  ('Χ', 4),
  ('Ψ', 5),
];

/// One of the lookup tables used by [`sum_values`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
  Vowels,
  Consonants,
  /// The union of vowels and consonants.
  Full,
}

impl Table {
  /// Value of `letter` in this table, if present.
  pub fn value_of(self, letter: char) -> Option<u32> {
    let find = |table: &[(char, u32)]| {
      table.iter().find(|(c, _)| *c == letter).map(|(_, v)| *v)
    };
    match self {
      Table::Vowels => find(VOWELS),
      Table::Consonants => find(CONSONANTS),
      Table::Full => find(VOWELS).or_else(|| find(CONSONANTS)),
    }
  }
}

/// The six derived numbers of a word.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Scores {
  pub n1: u32,
  pub n2: u32,
  pub n3: u32,
  pub n4: u32,
  pub n5: u32,
  pub n6: u32,
}

impl Scores {
  /// The fields in `n1..=n6` order.
  pub fn as_array(&self) -> [u32; 6] {
    [self.n1, self.n2, self.n3, self.n4, self.n5, self.n6]
  }
}

/// Trim surrounding whitespace and upper-case.
pub fn normalize_word(word: &str) -> String { word.trim().to_uppercase() }

/// Sum the table values of every letter in `word`. Letters absent from the
/// table contribute nothing.
pub fn sum_values(word: &str, table: Table) -> u32 {
  word
    .chars()
    .filter_map(|c| table.value_of(c))
    .fold(0u32, u32::saturating_add)
}

/// Repeatedly sum the decimal digits of `n` until a single digit remains.
pub fn reduce_number(mut n: u32) -> u32 {
  while n >= 10 {
    let mut sum = 0;
    while n > 0 {
      sum += n % 10;
      n /= 10;
    }
    n = sum;
  }
  n
}

/// Compute the six scores of `word`. Pure and total: any input, including an
/// empty string, yields a result.
pub fn calculate(word: &str) -> Scores {
  let word = normalize_word(word);
  let vowels = sum_values(&word, Table::Vowels);
  let consonants = sum_values(&word, Table::Consonants);
  let full = sum_values(&word, Table::Full);

  Scores {
    n1: vowels,
    n2: reduce_number(vowels),
    n3: consonants,
    n4: reduce_number(consonants),
    n5: full,
    n6: reduce_number(full),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tables_are_disjoint() {
    for (c, _) in VOWELS {
      assert!(
        Table::Consonants.value_of(*c).is_none(),
        "{c} appears in both tables"
      );
    }
  }

  #[test]
  fn full_table_is_the_union() {
    for (c, v) in VOWELS.iter().chain(CONSONANTS) {
      assert_eq!(Table::Full.value_of(*c), Some(*v));
    }
    assert_eq!(Table::Full.value_of('A'), None);
  }

  #[test]
  fn reduce_number_single_digits() {
    assert_eq!(reduce_number(0), 0);
    assert_eq!(reduce_number(7), 7);
    assert_eq!(reduce_number(10), 1);
    assert_eq!(reduce_number(19), 1);
    assert_eq!(reduce_number(99), 9);
    assert_eq!(reduce_number(999_999), 9);
    for n in (0..100_000).step_by(37) {
      assert!(reduce_number(n) < 10);
    }
    assert!(reduce_number(u32::MAX) < 10);
  }

  #[test]
  fn agape() {
    // Α1 Γ3 Α1 Π7 Η7
    let s = calculate("ΑΓΑΠΗ");
    assert_eq!(s, Scores { n1: 9, n2: 9, n3: 10, n4: 1, n5: 19, n6: 1 });
  }

  #[test]
  fn lowercase_and_whitespace_normalize() {
    assert_eq!(calculate("  αγάπη\t"), calculate("ΑΓΆΠΗ"));
    assert_eq!(calculate("λογος"), calculate("ΛΟΓΟΣ"));
    // final sigma upper-cases to Σ
    assert_eq!(calculate("λογος").n3, calculate("ΛΟΓΟΣ").n3);
    assert_eq!(calculate("λογος").n3, 2 + 3 + 9);
  }

  #[test]
  fn empty_and_blank_are_zero() {
    assert_eq!(calculate(""), Scores::default());
    assert_eq!(calculate("   \n"), Scores::default());
  }

  #[test]
  fn foreign_letters_contribute_nothing() {
    assert_eq!(calculate("hello, 123!"), Scores::default());
    assert_eq!(calculate("ΛΟΓΟΣ-42"), calculate("ΛΟΓΟΣ"));
  }

  #[test]
  fn full_sum_is_vowels_plus_consonants() {
    for w in ["ΑΓΑΠΗ", "ΛΟΓΟΣ", "ΦΙΛΟΣΟΦΙΑ", "ψυχή", "x", ""] {
      let s = calculate(w);
      assert_eq!(s.n5, s.n1 + s.n3, "{w}");
      assert!(s.n2 < 10 && s.n4 < 10 && s.n6 < 10);
    }
  }

  #[test]
  fn deterministic() {
    assert_eq!(calculate("ΘΕΟΣ"), calculate("ΘΕΟΣ"));
  }
}
