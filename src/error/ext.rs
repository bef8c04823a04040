use error_stack::Context;

use super::Error;
use crate::types;

pub trait ResultExt<T> {
  /// Hides whatever went wrong behind a generic internal error.
  fn or_internal(self) -> Result<T, Error>;
}

impl<T, C: Context> ResultExt<T> for error_stack::Result<T, C> {
  fn or_internal(self) -> Result<T, Error> {
    self.map_err(|report| Error::from_report(types::Error::Internal, report))
  }
}
