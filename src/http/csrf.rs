use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::actor::{app_of, SessionToken};

pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";
pub const CSRF_PARAMETER: &str = "_csrf";

#[derive(Debug, Error)]
#[error("Missing or mismatched anti-forgery token")]
struct CsrfMismatch;

/// Proof that a mutating request carried its session's anti-forgery
/// token in the [`CSRF_HEADER`] header.
///
/// Requests without a live session pass through so that the service
/// can answer them with `401`.
#[derive(Debug)]
pub struct CsrfChecked;

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

impl FromRequest for CsrfChecked {
    type Error = crate::error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let app = match app_of(req) {
            Ok(app) => app,
            Err(error) => return ready(Err(error)),
        };

        if !app.config.auth.csrf_protection {
            return ready(Ok(CsrfChecked));
        }

        let token = SessionToken::read(req, app);
        let Some(session) = app.auth.session(token.as_deref()) else {
            return ready(Ok(CsrfChecked));
        };

        let provided = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        // digests have a fixed length, so comparing them leaks nothing
        // about the length of the expected token
        if digest(provided) == digest(session.csrf_token.as_str()) {
            ready(Ok(CsrfChecked))
        } else {
            ready(Err(crate::error::Error::from_context(
                crate::types::Error::Forbidden,
                CsrfMismatch,
            )))
        }
    }
}
