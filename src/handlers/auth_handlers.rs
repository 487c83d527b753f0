use actix_web::{HttpRequest, HttpResponse, cookie::Cookie, web};

use crate::errors::AppError;
use crate::handlers::current_session;
use crate::middlewares::session::SESSION_COOKIE;
use crate::state::app_state::AppState;
use crate::structs::auth::{LoginRequest, RegisterRequest};

pub async fn register(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    app_state.auth.register(&req.username, &req.password).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Verify credentials and hand out the session cookie.
pub async fn login(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let mut rng = rand::rng();
    let session_key = app_state
        .auth
        .login(&req.username, &req.password, &mut rng)
        .await?;

    let cookie = Cookie::build(SESSION_COOKIE, session_key)
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).finish())
}

/// Drop the session. The cookie must be present, but a stale key is
/// still a successful logout.
pub async fn logout(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let cookie = req
        .cookie(SESSION_COOKIE)
        .ok_or_else(|| AppError::Validation("sessionKey cookie required".to_string()))?;

    app_state.auth.logout(cookie.value());
    Ok(HttpResponse::Ok().finish())
}

/// The username behind the session cookie, for the frontend's header.
pub async fn get_session_username(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let session = current_session(&req)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain")
        .body(session.username))
}
