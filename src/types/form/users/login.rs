use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::{types::form::REQUIRED_FIELD, util::Sensitive};

#[derive(Debug, Default, Deserialize)]
pub struct Request {
  #[serde(default)]
  pub email: Sensitive<String>,
  #[serde(default)]
  pub password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if self.email.as_str().trim().is_empty() {
      fields.insert("email", ValidateError::message(REQUIRED_FIELD));
    }
    if self.password.as_str().is_empty() {
      fields.insert("password", ValidateError::message(REQUIRED_FIELD));
    }
    fields.build().into_result()
  }
}
