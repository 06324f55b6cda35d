//! Strong ETags for generated documents.

use sha2::{Digest, Sha256};

/// Quoted SHA-256 hex digest of `body`.
pub fn compute_etag(body: &[u8]) -> String {
  let hash = Sha256::digest(body);
  format!("\"{}\"", hex::encode(hash))
}

fn strip_etag_quotes(s: &str) -> &str {
  let s = s.trim();
  let s = s.strip_prefix("W/").unwrap_or(s);
  s.trim_matches('"')
}

/// Whether an `If-None-Match` header value matches `etag`. Accepts `*`,
/// comma-separated lists, weak tags and unquoted tags.
pub fn if_none_match(header: &str, etag: &str) -> bool {
  let etag = strip_etag_quotes(etag);
  header
    .split(',')
    .map(str::trim)
    .any(|candidate| candidate == "*" || strip_etag_quotes(candidate) == etag)
}
