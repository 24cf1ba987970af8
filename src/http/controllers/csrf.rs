use actix_web::{web, HttpResponse};
use thiserror::Error;

use crate::{
    error::{Error, Result},
    http::{SessionToken, CSRF_HEADER, CSRF_PARAMETER},
    types::form::CsrfTokenView,
    App,
};

#[derive(Debug, Error)]
#[error("No session to issue an anti-forgery token for")]
struct NoSession;

/// Hands out the anti-forgery token bound to the caller's session.
#[tracing::instrument(skip_all)]
pub async fn token(app: web::Data<App>, token: SessionToken) -> Result<HttpResponse> {
    let session = app
        .auth
        .session(token.as_deref())
        .ok_or_else(|| Error::from_context(crate::types::Error::Unauthorized, NoSession))?;

    Ok(HttpResponse::Ok().json(CsrfTokenView {
        token: session.csrf_token.into_inner(),
        header_name: CSRF_HEADER,
        parameter_name: CSRF_PARAMETER,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use crate::util::test::{init_test_service, login};

    #[actix_web::test]
    async fn test_token_requires_session() {
        let service = init_test_service!();

        let req = test::TestRequest::get().uri("/api/csrf-token").to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let cookie = login!(&service, "user", "user");
        let req = test::TestRequest::get()
            .uri("/api/csrf-token")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["headerName"], "X-XSRF-TOKEN");
        assert_eq!(body["parameterName"], "_csrf");
        assert!(!body["token"].as_str().unwrap().is_empty());
    }
}
