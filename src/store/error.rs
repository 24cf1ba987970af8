use error_stack::Report;
use thiserror::Error;

/// Record store related errors
#[derive(Debug, Error)]
pub enum Error {
    /// An error caused by an invalid Postgres connection url.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An error caused by an [`sqlx`] error.
    #[error("received a pool error: {0}")]
    Internal(sqlx::Error),
    /// The pool does not have a reliable connection to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
    /// A uniqueness constraint rejected the write.
    #[error("record conflicts with an existing record")]
    Conflict,
    /// A stored row could not be turned back into a record.
    #[error("stored record is malformed")]
    CorruptRecord,
    /// The in-memory backend ran out of ids.
    #[error("id sequence is exhausted")]
    SequenceExhausted,
    #[error("failed to run database migrations")]
    Migration,
}

/// Converts from a generic [sqlx] result into a [store compatible error](Error).
pub trait ErrorExt<T> {
    fn into_store_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_store_error(self) -> Result<T> {
        self.map_err(|e| match &e {
            sqlx::Error::Database(err) if err.is_unique_violation() => {
                Report::new(e).change_context(Error::Conflict)
            }
            _ => Report::new(Error::Internal(e)),
        })
    }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a store error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Looking through `error_stack::Report<Error>` for a specific variant
/// gets repetitive at every call site.
pub trait ReportExt {
    fn is_unhealthy(&self) -> bool;
    fn is_conflict(&self) -> bool;
}

impl ReportExt for Report<Error> {
    fn is_unhealthy(&self) -> bool {
        matches!(self.current_context(), Error::UnhealthyPool)
    }

    fn is_conflict(&self) -> bool {
        matches!(self.current_context(), Error::Conflict)
    }
}
