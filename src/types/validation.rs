use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
    .expect("compile email regex")
});

pub const EMAIL_MAX: usize = 254;
pub const FULL_NAME_MAX: usize = 128;
pub const PASSWORD_MAX: usize = 1024;
pub const TAGS_MAX: usize = 32;
pub const TAG_MAX: usize = 64;

/// Only checks the shape of the address. Whether the mailbox
/// exists is none of our business.
pub fn is_valid_email(email: &str) -> bool {
  EMAIL_REGEX.is_match(email) && email.len() <= EMAIL_MAX
}

/// Trims every tag, drops the empty ones and removes duplicates
/// while keeping the order they were first given in.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  tags
    .into_iter()
    .map(|tag| tag.as_ref().trim().to_string())
    .filter(|tag| !tag.is_empty())
    .collect::<IndexSet<_>>()
    .into_iter()
    .collect()
}

/// Errors for a list of tags that is too long or has tags that are
/// too long. Checked on the raw input, before normalizing.
pub fn validate_tags(tags: &[String]) -> validator::ValidateError {
  let mut error = validator::ValidateError::msg_builder();
  if tags.len() > TAGS_MAX {
    error.insert(format!("Notes can only have up to {TAGS_MAX} tags"));
  }
  if tags.iter().any(|tag| tag.trim().chars().count() > TAG_MAX) {
    error.insert(format!("Tags must be at most {TAG_MAX} characters long"));
  }
  error.build()
}
