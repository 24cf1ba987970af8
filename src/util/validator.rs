use error_stack::Report;
use thiserror::Error;

use crate::types::validation::ValidateError;

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Turns a [`ValidateError`] into a report carrying one
/// `path: message` attachment per failed rule.
pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidateError> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        self.map_err(|error| {
            error
                .flatten()
                .into_iter()
                .fold(Report::new(Wrapper), Report::attach_printable)
        })
    }
}
