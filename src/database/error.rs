use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
  /// An error caused by an invalid Postgres connection url.
  #[error("invalid connection url")]
  InvalidUrl,
  /// An error caused by an [`sqlx`] error.
  #[error("received a pool error: {0}")]
  Internal(sqlx::Error),
  /// Pending migrations could not be applied.
  #[error("could not apply database migrations")]
  Migration,
  /// The database is currently in read mode (most likely
  /// due to maintenance) and should not perform any writes.
  #[error("database is currently in read mode")]
  Readonly,
  /// A write conflicted with an existing record on one of its
  /// unique columns (like the email of a user).
  #[error("unique constraint violated")]
  UniqueViolation,
  /// The database pool does not have reliable connection
  /// to transact to the database.
  #[error("unhealthy database pool")]
  UnhealthyPool,
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
  fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
  fn into_db_error(self) -> Result<T> {
    self.map_err(|e| match &e {
      sqlx::Error::Database(err) if err.message().ends_with("read-only transaction") => {
        Report::new(e).change_context(Error::Readonly)
      }
      sqlx::Error::Database(err) if err.is_unique_violation() => {
        Report::new(e).change_context(Error::UniqueViolation)
      }
      _ => Report::new(Error::Internal(e)),
    })
  }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Saves a `match` on [`Report::current_context`] every time we
/// need to know what kind of database error happened.
pub trait ReportExt {
  fn is_unhealthy(&self) -> bool;
  fn is_readonly(&self) -> bool;
  fn is_unique_violation(&self) -> bool;
}

impl ReportExt for Report<Error> {
  fn is_unhealthy(&self) -> bool {
    matches!(self.current_context(), Error::UnhealthyPool)
  }

  fn is_readonly(&self) -> bool {
    matches!(self.current_context(), Error::Readonly)
  }

  fn is_unique_violation(&self) -> bool {
    matches!(self.current_context(), Error::UniqueViolation)
  }
}
