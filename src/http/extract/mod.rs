use actix_web::web::JsonConfig;
use thiserror::Error;
use validator::ValidateError;

use crate::{types, Error};

mod session_user;
pub use session_user::SessionUser;

const JSON_LIMIT: usize = 2_097_152; // 2 mb

#[derive(Debug, Error)]
#[error("Could not read JSON body")]
struct InvalidJson;

/// Malformed JSON bodies are answered like any other invalid form.
pub fn json_config() -> JsonConfig {
  JsonConfig::default()
    .limit(JSON_LIMIT)
    .content_type_required(false)
    .error_handler(|error, _req| {
      let fields = ValidateError::message(error.to_string());
      Error::from_context(types::Error::InvalidFormBody { fields }, InvalidJson)
        .attach_printable(error.to_string())
        .into()
    })
}
