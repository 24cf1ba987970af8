use actix_web::web;

pub mod auth;
pub mod boats;
pub mod csrf;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/boats")
            .route("", web::get().to(boats::list))
            .route("", web::post().to(boats::create))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(boats::get))
                    .route(web::delete().to(boats::delete)),
            )
            .route("/{id}/name", web::patch().to(boats::update_name))
            .route("/{id}/description", web::patch().to(boats::update_description))
            .route("/{id}/type", web::patch().to(boats::update_type)),
    )
    .service(
        web::scope("/api/auth")
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/user", web::get().to(auth::user)),
    )
    .route("/api/csrf-token", web::get().to(csrf::token));
}
