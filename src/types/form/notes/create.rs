use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::types::{form::REQUIRED_FIELD, validation};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub tags: Option<Vec<String>>,
  #[serde(default)]
  pub is_pinned: Option<bool>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if validator::extras::is_blank(&self.title) {
      fields.insert("title", ValidateError::message(REQUIRED_FIELD));
    }
    if validator::extras::is_blank(&self.content) {
      fields.insert("content", ValidateError::message(REQUIRED_FIELD));
    }
    if let Some(tags) = self.tags.as_deref() {
      fields.insert("tags", validation::validate_tags(tags));
    }
    fields.build().into_result()
  }
}
