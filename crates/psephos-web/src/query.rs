//! Helpers for rebuilding links from the current query string.
//!
//! Pairs are kept in their original percent-encoded form, so preserving the
//! user's filters never requires decoding and re-encoding them.

/// The current request's query string as ordered, still-encoded pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
  pairs: Vec<(String, String)>,
}

impl QueryString {
  pub fn parse(raw: Option<&str>) -> Self {
    let pairs = raw
      .unwrap_or_default()
      .split('&')
      .filter(|p| !p.is_empty())
      .map(|p| match p.split_once('=') {
        Some((k, v)) => (k.to_string(), v.to_string()),
        None => (p.to_string(), String::new()),
      })
      .collect();
    Self { pairs }
  }

  /// A copy with `key` removed.
  pub fn without(&self, key: &str) -> Self {
    Self {
      pairs: self.pairs.iter().filter(|(k, _)| k != key).cloned().collect(),
    }
  }

  /// A copy with `key` set to `value`, replacing any previous values.
  /// `value` must already be URL-safe.
  pub fn with(&self, key: &str, value: &str) -> Self {
    let mut next = self.without(key);
    next.pairs.push((key.to_string(), value.to_string()));
    next
  }

  pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

  /// `path` with this query appended, if any.
  pub fn url(&self, path: &str) -> String {
    if self.is_empty() {
      path.to_string()
    } else {
      format!("{path}?{self}")
    }
  }
}

impl std::fmt::Display for QueryString {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, (k, v)) in self.pairs.iter().enumerate() {
      if i > 0 {
        f.write_str("&")?;
      }
      write!(f, "{k}={v}")?;
    }
    Ok(())
  }
}
