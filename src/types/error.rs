use serde::Serialize;
use std::fmt::Display;

use super::validation::ValidateError;

/// Client-visible error taxonomy. Only this part of a failed request
/// ends up in the response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Error {
    Internal,
    InvalidFormBody(ValidateError),
    Conflict(ValidateError),
    NotFound,
    InvalidCredentials,
    Unauthorized,
    Forbidden,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Internal => f.write_str("Failed to perform request"),
            Error::InvalidFormBody(..) => f.write_str("User performed request with invalid body"),
            Error::Conflict(..) => f.write_str("Request conflicts with an existing record"),
            Error::NotFound => f.write_str("Requested resource is not found"),
            Error::InvalidCredentials => f.write_str("Invalid username or password"),
            Error::Unauthorized => f.write_str("Authentication is required"),
            Error::Forbidden => f.write_str("Access denied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_variants_json() {
        let cases = [
            (Error::Internal, "internal"),
            (Error::NotFound, "not_found"),
            (Error::InvalidCredentials, "invalid_credentials"),
            (Error::Unauthorized, "unauthorized"),
            (Error::Forbidden, "forbidden"),
        ];

        for (error, kind) in cases {
            assert_eq!(serde_json::to_value(&error).unwrap(), json!({ "type": kind }));
        }
    }

    #[test]
    fn test_form_body_json() {
        let error = Error::InvalidFormBody(ValidateError::field("name", "Boat name is required"));
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "type": "invalid_form_body",
                "data": { "name": { "_errors": ["Boat name is required"] } },
            })
        );
    }
}
