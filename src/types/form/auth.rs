use serde::{Deserialize, Serialize};

use crate::types::{
    validation::{Validate, ValidateError},
    Sensitive,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: Sensitive<String>,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if self.username.trim().is_empty() {
            fields.insert_msg("username", "Username is required");
        }
        if self.password.as_str().trim().is_empty() {
            fields.insert_msg("password", "Password is required");
        }
        fields.build().into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityView {
    pub username: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenView {
    pub token: String,
    pub header_name: &'static str,
    pub parameter_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub message: &'static str,
}
