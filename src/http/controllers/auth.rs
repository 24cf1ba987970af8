use actix_web::{
    cookie::{Cookie, SameSite},
    web::{self, Json},
    HttpResponse,
};

use crate::{
    auth::Actor,
    error::Result,
    http::SessionToken,
    types::form::{IdentityView, LoginForm, MessageView},
    App,
};

fn session_cookie(app: &App, value: String) -> Cookie<'static> {
    Cookie::build(app.config.auth.session_cookie.clone(), value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(app.config.auth.secure_cookie)
        .finish()
}

#[tracing::instrument(skip_all)]
pub async fn login(
    app: web::Data<App>,
    previous: SessionToken,
    form: Json<LoginForm>,
) -> Result<HttpResponse> {
    let authenticated = app.auth.authenticate(&form).await?;

    // a failed attempt leaves the current session alone
    app.auth.logout(previous.as_deref());
    let cookie = session_cookie(&app, authenticated.token.into_inner());

    Ok(HttpResponse::Ok().cookie(cookie).json(IdentityView {
        username: authenticated.identity.username,
        authenticated: true,
    }))
}

#[tracing::instrument(skip_all)]
pub async fn logout(app: web::Data<App>, token: SessionToken) -> HttpResponse {
    app.auth.logout(token.as_deref());

    let mut cookie = session_cookie(&app, String::new());
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(MessageView {
        message: "Logged out successfully",
    })
}

#[tracing::instrument(skip_all)]
pub async fn user(actor: Actor) -> Result<HttpResponse> {
    let identity = actor.require_role(crate::auth::Role::User)?;
    Ok(HttpResponse::Ok().json(IdentityView {
        username: identity.username.clone(),
        authenticated: true,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::util::test::{init_test_service, login};

    #[actix_web::test]
    async fn test_login_sets_session_cookie() {
        let service = init_test_service!();

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "user", "password": "user" }))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "BOATHUB_SESSION")
            .map(|c| c.into_owned())
            .unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(actix_web::cookie::SameSite::Lax));

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "username": "user", "authenticated": true }));

        let req = test::TestRequest::get()
            .uri("/api/auth/user")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["username"], "user");
    }

    #[actix_web::test]
    async fn test_login_rejects_bad_credentials() {
        let service = init_test_service!();

        for (username, password) in [
            ("user", "wrong"),
            ("nobody", "user"),
            ("disabled", "disabled"),
            ("anonymousUser", "anything"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request();
            let res = test::call_service(&service, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{username}");

            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["type"], "invalid_credentials");
        }

        let req = test::TestRequest::get().uri("/api/auth/user").to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_failed_login_keeps_current_session() {
        let service = init_test_service!();
        let cookie = login!(&service, "user", "user");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .cookie(cookie.clone())
            .set_json(json!({ "username": "user", "password": "wrong" }))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/auth/user")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_as_someone_else_closes_current_session() {
        let service = init_test_service!();
        let user = login!(&service, "user", "user");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .cookie(user.clone())
            .set_json(json!({ "username": "admin", "password": "admin" }))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/auth/user")
            .cookie(user)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_logout_invalidates_session() {
        let service = init_test_service!();
        let cookie = login!(&service, "user", "user");

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(cookie.clone())
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let removal = res
            .response()
            .cookies()
            .find(|c| c.name() == "BOATHUB_SESSION")
            .map(|c| c.into_owned())
            .unwrap();
        assert_eq!(removal.value(), "");

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Logged out successfully");

        // the old cookie is still presented but no longer resolves
        let req = test::TestRequest::get()
            .uri("/api/auth/user")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_new_login_invalidates_older_session() {
        let service = init_test_service!();
        let first = login!(&service, "user", "user");
        let second = login!(&service, "user", "user");

        let req = test::TestRequest::get()
            .uri("/api/auth/user")
            .cookie(first)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/auth/user")
            .cookie(second)
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
