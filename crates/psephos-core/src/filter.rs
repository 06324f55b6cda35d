//! Typed filter parameters and the predicate they resolve to.
//!
//! Filter input is never rejected. Blank, `"any"` and malformed numbers mean
//! "not specified"; out-of-range numbers are clamped into
//! `[0, FILTER_MAX]`.
//!
//! Per score field the resolution order is:
//!
//! 1. An exact value wins and the bounds are ignored.
//! 2. If both bounds are set and `max <= min`, `max` becomes `min + 1`
//!    (capped at [`FILTER_MAX`]).
//! 3. Each remaining bound becomes its own clause.

use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};

/// Upper clamp for numeric filter values.
pub const FILTER_MAX: u32 = 999_999;

// ─── Fields ──────────────────────────────────────────────────────────────────

/// One of the six numeric columns.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ScoreField {
  N1,
  N2,
  N3,
  N4,
  N5,
  N6,
}

impl ScoreField {
  /// Column name, e.g. `"n3"`.
  pub fn column(self) -> &'static str { self.into() }
}

// ─── Raw parameters ──────────────────────────────────────────────────────────

/// Exact/min/max raw values for one score field.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRange<'a> {
  pub exact: Option<&'a str>,
  pub min:   Option<&'a str>,
  pub max:   Option<&'a str>,
}

/// Every recognised filter parameter, as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
  /// Substring match on the word.
  pub q: Option<String>,

  pub n1:     Option<String>,
  pub n1_min: Option<String>,
  pub n1_max: Option<String>,
  pub n2:     Option<String>,
  pub n2_min: Option<String>,
  pub n2_max: Option<String>,
  pub n3:     Option<String>,
  pub n3_min: Option<String>,
  pub n3_max: Option<String>,
  pub n4:     Option<String>,
  pub n4_min: Option<String>,
  pub n4_max: Option<String>,
  pub n5:     Option<String>,
  pub n5_min: Option<String>,
  pub n5_max: Option<String>,
  pub n6:     Option<String>,
  pub n6_min: Option<String>,
  pub n6_max: Option<String>,
}

impl FilterParams {
  /// Collect the recognised keys from decoded query pairs. The first value
  /// of a repeated key wins; unknown keys are ignored.
  pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: AsRef<str>,
    V: Into<String>,
  {
    let mut params = Self::default();
    for (key, value) in pairs {
      if let Some(slot) = params.slot(key.as_ref())
        && slot.is_none()
      {
        *slot = Some(value.into());
      }
    }
    params
  }

  fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
    let slot = match key {
      "q" => &mut self.q,
      "n1" => &mut self.n1,
      "n1_min" => &mut self.n1_min,
      "n1_max" => &mut self.n1_max,
      "n2" => &mut self.n2,
      "n2_min" => &mut self.n2_min,
      "n2_max" => &mut self.n2_max,
      "n3" => &mut self.n3,
      "n3_min" => &mut self.n3_min,
      "n3_max" => &mut self.n3_max,
      "n4" => &mut self.n4,
      "n4_min" => &mut self.n4_min,
      "n4_max" => &mut self.n4_max,
      "n5" => &mut self.n5,
      "n5_min" => &mut self.n5_min,
      "n5_max" => &mut self.n5_max,
      "n6" => &mut self.n6,
      "n6_min" => &mut self.n6_min,
      "n6_max" => &mut self.n6_max,
      _ => return None,
    };
    Some(slot)
  }

  /// Raw exact/min/max values for `field`.
  pub fn range(&self, field: ScoreField) -> RawRange<'_> {
    let (exact, min, max) = match field {
      ScoreField::N1 => (&self.n1, &self.n1_min, &self.n1_max),
      ScoreField::N2 => (&self.n2, &self.n2_min, &self.n2_max),
      ScoreField::N3 => (&self.n3, &self.n3_min, &self.n3_max),
      ScoreField::N4 => (&self.n4, &self.n4_min, &self.n4_max),
      ScoreField::N5 => (&self.n5, &self.n5_min, &self.n5_max),
      ScoreField::N6 => (&self.n6, &self.n6_min, &self.n6_max),
    };
    RawRange {
      exact: exact.as_deref(),
      min:   min.as_deref(),
      max:   max.as_deref(),
    }
  }

  /// Resolve into a [`Predicate`]: text filter first, then `n1..=n6`.
  pub fn predicate(&self) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    {
      clauses.push(Clause::WordContains(q.to_uppercase()));
    }

    for field in ScoreField::iter() {
      let range = self.range(field);
      if let Some(exact) = parse_int(range.exact) {
        clauses.push(Clause::Eq(field, exact));
        continue;
      }

      let min = parse_int(range.min);
      let mut max = parse_int(range.max);
      if let (Some(lo), Some(hi)) = (min, max)
        && hi <= lo
      {
        max = Some((lo + 1).min(FILTER_MAX));
      }

      if let Some(lo) = min {
        clauses.push(Clause::AtLeast(field, lo));
      }
      if let Some(hi) = max {
        clauses.push(Clause::AtMost(field, hi));
      }
    }

    Predicate { clauses }
  }
}

/// Parse a numeric filter value. `None`, blank, `"any"` and anything that is
/// not an integer resolve to `None`; integers are clamped into
/// `[0, FILTER_MAX]`. Digits may be grouped with single underscores
/// (`1_000`).
pub fn parse_int(raw: Option<&str>) -> Option<u32> {
  let s = raw?.trim();
  if s.is_empty() || s == "any" {
    return None;
  }

  let (negative, digits) = match s.as_bytes()[0] {
    b'-' => (true, &s[1..]),
    b'+' => (false, &s[1..]),
    _ => (false, s),
  };
  let well_formed = digits
    .split('_')
    .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
  if !well_formed {
    return None;
  }
  if negative {
    return Some(0);
  }

  // Too wide for u32 still clamps.
  let value = digits
    .bytes()
    .filter(u8::is_ascii_digit)
    .try_fold(0u32, |acc, b| {
      acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    });
  Some(value.map_or(FILTER_MAX, |n| n.min(FILTER_MAX)))
}

// ─── Predicate ───────────────────────────────────────────────────────────────

/// A single filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
  /// The (upper-cased) word contains this text.
  WordContains(String),
  Eq(ScoreField, u32),
  AtLeast(ScoreField, u32),
  AtMost(ScoreField, u32),
}

/// A value bound to a clause placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
  Text(String),
  Int(u32),
}

impl Clause {
  /// The value this clause binds. `WordContains` binds a `%text%` pattern.
  pub fn bound_value(&self) -> BoundValue {
    match self {
      Clause::WordContains(text) => BoundValue::Text(format!("%{text}%")),
      Clause::Eq(_, v) | Clause::AtLeast(_, v) | Clause::AtMost(_, v) => {
        BoundValue::Int(*v)
      }
    }
  }
}

/// Canonical form, with `?` standing for the bound value.
impl fmt::Display for Clause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Clause::WordContains(_) => f.write_str("word LIKE ?"),
      Clause::Eq(field, _) => write!(f, "{field} = ?"),
      Clause::AtLeast(field, _) => write!(f, "{field} >= ?"),
      Clause::AtMost(field, _) => write!(f, "{field} <= ?"),
    }
  }
}

/// A conjunction of clauses. Empty matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
  clauses: Vec<Clause>,
}

impl Predicate {
  /// The predicate that matches every row.
  pub fn all() -> Self { Self::default() }

  pub fn clauses(&self) -> &[Clause] { &self.clauses }

  pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

  /// Bound values in clause order.
  pub fn bound_values(&self) -> Vec<BoundValue> {
    self.clauses.iter().map(Clause::bound_value).collect()
  }
}
