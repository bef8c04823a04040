use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;
use serde_json::{json, Value};

use super::Error;
use crate::{database, types::Error as ErrorType};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::NotFound => StatusCode::NOT_FOUND,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
      ErrorType::Unauthorized | ErrorType::ExpiredToken => StatusCode::UNAUTHORIZED,
      ErrorType::InvalidFormBody { .. }
      | ErrorType::EmailTaken
      | ErrorType::UserNotFound
      | ErrorType::InvalidCredentials
      | ErrorType::NoteNotFound => StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    if matches!(self.error_type, ErrorType::Internal) {
      tracing::error!(error = ?self, "internal server error occurred");
    }

    let mut body = json!({
      "error": true,
      "message": self.error_type.to_string(),
    });

    if let (Value::Object(body), Ok(Value::Object(kind))) =
      (&mut body, serde_json::to_value(&self.error_type))
    {
      body.extend(kind);
    }

    HttpResponse::build(self.status_code()).json(body)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    match value.current_context() {
      database::Error::Readonly => Error::from_report(ErrorType::ReadonlyMode, value),
      _ => Error::from_report(ErrorType::Internal, value),
    }
  }
}

impl From<validator::ValidateError> for Error {
  fn from(value: validator::ValidateError) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Validation error occurred")]
    struct ValidateError;
    Error::from_context(ErrorType::InvalidFormBody { fields: value }, ValidateError)
  }
}
