//! One-shot notices carried across the post/redirect/get cycle in a cookie.

use axum::http::{HeaderMap, HeaderValue, header};

const COOKIE_NAME: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
  /// Words were added or refreshed.
  Added(usize),
  /// The add form was submitted empty.
  NoWords,
  /// The add form held only separators.
  NoValidWords,
}

impl Flash {
  pub fn message(&self) -> String {
    match self {
      Flash::Added(n) => format!("Added/updated {n} words."),
      Flash::NoWords => "No words provided.".to_string(),
      Flash::NoValidWords => "No valid words found.".to_string(),
    }
  }

  /// CSS class for the notice.
  pub fn level(&self) -> &'static str {
    match self {
      Flash::Added(_) => "success",
      Flash::NoWords | Flash::NoValidWords => "warning",
    }
  }

  fn encode(&self) -> String {
    match self {
      Flash::Added(n) => format!("added.{n}"),
      Flash::NoWords => "empty".to_string(),
      Flash::NoValidWords => "invalid".to_string(),
    }
  }

  fn decode(s: &str) -> Option<Self> {
    match s {
      "empty" => Some(Flash::NoWords),
      "invalid" => Some(Flash::NoValidWords),
      other => other.strip_prefix("added.")?.parse().ok().map(Flash::Added),
    }
  }

  /// `Set-Cookie` value storing this notice.
  pub fn set_cookie(&self) -> HeaderValue {
    let value = format!(
      "{COOKIE_NAME}={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
      self.encode()
    );
    HeaderValue::from_str(&value)
      .unwrap_or_else(|_| HeaderValue::from_static("flash=; Path=/; Max-Age=0"))
  }

  /// `Set-Cookie` value clearing any stored notice.
  pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
  }

  /// Read the notice from request cookies, if one is pending.
  pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
    headers
      .get_all(header::COOKIE)
      .iter()
      .filter_map(|v| v.to_str().ok())
      .flat_map(|v| v.split(';'))
      .filter_map(|pair| pair.trim().split_once('='))
      .find(|(name, _)| *name == COOKIE_NAME)
      .and_then(|(_, value)| Self::decode(value))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn headers_with_cookie(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
    headers
  }

  #[test]
  fn roundtrip_through_cookie_header() {
    for flash in [Flash::Added(12), Flash::NoWords, Flash::NoValidWords] {
      let set = flash.set_cookie();
      let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
      let headers = headers_with_cookie(&format!("theme=dark; {pair}"));
      assert_eq!(Flash::from_headers(&headers), Some(flash));
    }
  }

  #[test]
  fn cleared_or_garbage_cookie_is_ignored() {
    assert_eq!(Flash::from_headers(&headers_with_cookie("flash=")), None);
    assert_eq!(Flash::from_headers(&headers_with_cookie("flash=added.x")), None);
    assert_eq!(Flash::from_headers(&HeaderMap::new()), None);
  }

  #[test]
  fn messages() {
    assert_eq!(Flash::Added(3).message(), "Added/updated 3 words.");
    assert_eq!(Flash::NoWords.level(), "warning");
  }
}
