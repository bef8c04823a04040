mod url;

pub use self::url::validate_url;

/// Whether the string is empty or only made of whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
  value.trim().is_empty()
}
