use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::{
  types::{
    form::REQUIRED_FIELD,
    validation::{self, is_valid_email},
  },
  util::Sensitive,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub email: Sensitive<String>,
  #[serde(default)]
  pub password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("fullName", {
      let mut error = ValidateError::msg_builder();
      if validator::extras::is_blank(&self.full_name) {
        error.insert(REQUIRED_FIELD);
      } else if self.full_name.trim().len() > validation::FULL_NAME_MAX {
        error.insert("Full name is too long");
      }
      error.build()
    });

    fields.insert("email", {
      let mut error = ValidateError::msg_builder();
      let email = self.email.as_str().trim();
      if email.is_empty() {
        error.insert(REQUIRED_FIELD);
      } else if !is_valid_email(email) {
        error.insert("Invalid e-mail address");
      }
      error.build()
    });

    // Passwords are taken as is, whitespace included.
    fields.insert("password", {
      let mut error = ValidateError::msg_builder();
      if self.password.as_str().is_empty() {
        error.insert(REQUIRED_FIELD);
      } else if self.password.as_str().len() > validation::PASSWORD_MAX {
        error.insert("Passwords must not be too big");
      }
      error.build()
    });

    fields.build().into_result()
  }
}
