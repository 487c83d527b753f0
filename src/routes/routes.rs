use actix_web::web;

use crate::handlers::auth_handlers::{get_session_username, login, logout, register};
use crate::handlers::health_handlers::health_check;
use crate::handlers::link_handlers::{
    get_link_data, get_links, redirect_or_fallback, remove_link, shorten,
};
use crate::middlewares::session::SessionAuth;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Open API routes; /api/shorten picks up the session cookie on its
    // own when one is present.
    cfg.service(
        web::scope("/api")
            .route("/shorten", web::post().to(shorten))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/health/check", web::get().to(health_check))
            // Routes below require a live session.
            .service(
                web::scope("")
                    .wrap(SessionAuth)
                    .route("/getLinks", web::get().to(get_links))
                    .route("/getSessionUsername", web::get().to(get_session_username))
                    .route("/removeLink", web::post().to(remove_link))
                    .route("/getLinkData", web::post().to(get_link_data)),
            ),
    );
    // Everything else is either a short link or frontend content.
    cfg.default_service(web::get().to(redirect_or_fallback));
}
