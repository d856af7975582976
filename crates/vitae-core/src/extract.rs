//! Best-effort extraction of contact fields from free-form header text.
//!
//! The header format is not formalised. The rules are:
//!
//! - **name**: everything before the first line break or `|`, trimmed.
//!   Falls back to [`UNKNOWN_NAME`].
//! - **email**: first match of a permissive `local@domain.tld` pattern.
//! - **phone**: first run of grouped digits with an optional country code.
//! - **location**: the segment after the last `|`. The text before the first
//!   comma is the city, the next comma-separated segment the country.
//!
//! Anything not found becomes an empty string.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::resume::Draft;

/// Name used when the header carries no usable first line.
pub const UNKNOWN_NAME: &str = "Unknown";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9._-]+").expect("email pattern")
});

/// Digits are ASCII only; `\d` would also accept other scripts' numerals.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
    .expect("phone pattern")
});

/// Build a [`Draft`] from the header text of a document.
///
/// Pure: the same inputs always give the same draft.
pub fn extract_fields(
  header_text: &str,
  markup:      &str,
  template:    &str,
  created_at:  DateTime<Utc>,
) -> Draft {
  let (city, country) = location(header_text);

  Draft {
    name: name(header_text),
    email: first_match(&EMAIL_RE, header_text),
    phone: first_match(&PHONE_RE, header_text),
    city,
    country,
    resume_content: markup.to_owned(),
    template: template.to_owned(),
    created_at,
  }
}

fn name(text: &str) -> String {
  let first = text.split(['\n', '|']).next().unwrap_or_default().trim();
  if first.is_empty() { UNKNOWN_NAME.to_owned() } else { first.to_owned() }
}

fn first_match(re: &Regex, text: &str) -> String {
  re.find(text).map(|m| m.as_str().trim().to_owned()).unwrap_or_default()
}

/// Split the trailing `|` segment into `(city, country)`.
///
/// A header without any `|` has no location segment.
fn location(text: &str) -> (String, String) {
  let Some((_, tail)) = text.rsplit_once('|') else {
    return (String::new(), String::new());
  };

  let mut parts = tail.split(',');
  let city = parts.next().unwrap_or_default().trim().to_owned();
  let country = parts.next().map(str::trim).unwrap_or_default().to_owned();
  (city, country)
}
