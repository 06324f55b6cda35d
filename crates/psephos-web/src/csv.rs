//! CSV encoding of export rows (RFC 4180, CRLF line endings).

use std::borrow::Cow;

use psephos_core::WordScores;

pub const HEADER: [&str; 7] = ["word", "n1", "n2", "n3", "n4", "n5", "n6"];

/// Quote a field if it contains a delimiter, quote or line break.
fn field(s: &str) -> Cow<'_, str> {
  if s.contains([',', '"', '\r', '\n']) {
    Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
  } else {
    Cow::Borrowed(s)
  }
}

/// Encode `rows` as a CSV document, header line first.
pub fn encode(rows: &[WordScores]) -> String {
  let mut out = HEADER.join(",");
  out.push_str("\r\n");
  for row in rows {
    out.push_str(&field(&row.word));
    for n in row.scores.as_array() {
      out.push(',');
      out.push_str(&n.to_string());
    }
    out.push_str("\r\n");
  }
  out
}
