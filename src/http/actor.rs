use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use thiserror::Error;

use crate::auth::Actor;
use crate::types::Sensitive;
use crate::App;

#[derive(Debug, Error)]
#[error("The web app has no available configuration")]
struct NoConfig;

pub(super) fn app_of(req: &HttpRequest) -> Result<&web::Data<App>, crate::error::Error> {
    req.app_data::<web::Data<App>>()
        .ok_or_else(|| crate::error::Error::from_context(crate::types::Error::Internal, NoConfig))
}

/// Raw session token from the session cookie, if the client sent one.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<Sensitive<String>>);

impl SessionToken {
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_ref().map(Sensitive::as_str)
    }

    pub(super) fn read(req: &HttpRequest, app: &App) -> Self {
        let token = req
            .cookie(&app.config.auth.session_cookie)
            .map(|cookie| Sensitive::new(cookie.value().to_string()))
            .filter(|token| !token.as_str().is_empty());
        Self(token)
    }
}

impl FromRequest for SessionToken {
    type Error = crate::error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(app_of(req).map(|app| SessionToken::read(req, app)))
    }
}

/// Resolves the session cookie into an [`Actor`]. Requests without a
/// live session become [`Actor::Anonymous`], rejecting them is up to
/// the service being called.
impl FromRequest for Actor {
    type Error = crate::error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(app_of(req).map(|app| {
            let token = SessionToken::read(req, app);
            app.auth.current_principal(token.as_deref())
        }))
    }
}
