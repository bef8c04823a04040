use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::types::validation;

/// Partial update of a note. A field left out of the body (or sent
/// as `null`) is left untouched, so `"isPinned": false` and `"tags": []`
/// are real changes rather than "nothing given".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
  pub title: Option<String>,
  pub content: Option<String>,
  pub tags: Option<Vec<String>>,
  pub is_pinned: Option<bool>,
}

impl Request {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.title.is_none() && self.content.is_none() && self.tags.is_none() && self.is_pinned.is_none()
  }
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    if self.is_empty() {
      return Err(ValidateError::message("No changes provided"));
    }

    let mut fields = ValidateError::field_builder();
    if self.title.as_deref().is_some_and(validator::extras::is_blank) {
      fields.insert("title", ValidateError::message("Title must not be empty"));
    }
    if self.content.as_deref().is_some_and(validator::extras::is_blank) {
      fields.insert("content", ValidateError::message("Content must not be empty"));
    }
    if let Some(tags) = self.tags.as_deref() {
      fields.insert("tags", validation::validate_tags(tags));
    }
    fields.build().into_result()
  }
}
