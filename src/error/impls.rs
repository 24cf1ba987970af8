use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::store::{self, ReportExt};
use crate::types::{
    validation::{self, ValidateError},
    Error as ErrorType,
};

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::InvalidFormBody(..) | ErrorType::Conflict(..) => StatusCode::BAD_REQUEST,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::InvalidCredentials | ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorType::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self.report, trace = %self.trace, "request failed");
        } else {
            tracing::warn!(error = %self.error_type, "request rejected");
        }
        HttpResponse::build(status).json(&self.error_type)
    }
}

/// Uniqueness violations surface as a field error on `name`, the only
/// unique boat field. Everything else is internal.
impl From<Report<store::Error>> for Error {
    fn from(value: Report<store::Error>) -> Self {
        if value.is_conflict() {
            let data = ValidateError::field("name", validation::NAME_TAKEN);
            Error::from_report(ErrorType::Conflict(data), value)
        } else {
            Error::from_report(ErrorType::Internal, value)
        }
    }
}

impl From<ValidateError> for Error {
    fn from(value: ValidateError) -> Self {
        #[derive(Debug, thiserror::Error)]
        #[error("Validation error occurred")]
        struct ValidateFailed;

        let report = Report::new(ValidateFailed)
            .attach_printable(value.flatten().join(", "));
        Error::from_report(ErrorType::InvalidFormBody(value), report)
    }
}
