use serde::Serialize;
use std::borrow::Cow;

pub mod notes;
pub mod users;

pub(crate) const REQUIRED_FIELD: &str = "This field is required";

/// Successful responses share the same shape as failed ones: an
/// `error` flag, a human readable `message` and then the payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub error: bool,
  pub message: Cow<'static, str>,
  #[serde(flatten)]
  pub data: T,
}

impl<T: Serialize> Envelope<T> {
  #[must_use]
  pub fn ok(message: impl Into<Cow<'static, str>>, data: T) -> Self {
    Self {
      error: false,
      message: message.into(),
      data,
    }
  }
}

/// Payload of responses that have nothing else to say.
#[derive(Debug, Serialize)]
pub struct Empty {}
