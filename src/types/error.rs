use serde::Serialize;
use std::fmt::Display;

/// Every kind of failure a client can receive from the API.
///
/// It is serialized next to the `error` and `message` fields of
/// every failed response, with `type` as its discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
  Internal,
  InvalidFormBody { fields: validator::ValidateError },
  EmailTaken,
  UserNotFound,
  InvalidCredentials,
  NoteNotFound,
  Unauthorized,
  ExpiredToken,
  NotFound,
  ReadonlyMode,
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Internal => f.write_str("Internal Server Error"),
      Error::InvalidFormBody { .. } => f.write_str("Missing or invalid fields"),
      Error::EmailTaken => f.write_str("User already exists"),
      Error::UserNotFound => f.write_str("User does not exist"),
      Error::InvalidCredentials => f.write_str("Invalid credentials"),
      Error::NoteNotFound => f.write_str("Note does not exist"),
      Error::Unauthorized => f.write_str("Authentication required"),
      Error::ExpiredToken => f.write_str("Access token has expired"),
      Error::NotFound => f.write_str("Resource not found"),
      Error::ReadonlyMode => f.write_str("Attempt to write read-only database"),
    }
  }
}
