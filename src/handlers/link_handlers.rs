use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, http::header, web};

use crate::errors::AppError;
use crate::handlers::current_session;
use crate::middlewares::session::SESSION_COOKIE;
use crate::services::alias::ALIAS_LENGTH;
use crate::state::app_state::AppState;
use crate::structs::link::LinkDataResponse;

/// Shorten a long URL. The body is the raw URL text; the response is
/// the allocated alias as plain text. When the caller carries a valid
/// session cookie the alias is added to their links.
pub async fn shorten(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    body: String,
) -> Result<HttpResponse, AppError> {
    let owner = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| app_state.sessions.get(cookie.value()))
        .map(|session| session.username);

    let mut rng = rand::rng();
    let alias = app_state
        .links
        .shorten(&body, owner.as_deref(), &mut rng)
        .await?;

    Ok(HttpResponse::Ok().content_type("text/plain").body(alias))
}

/// Redirect an alias to its long URL, recording the click off the
/// response path. Anything that does not resolve falls through to the
/// static frontend.
pub async fn redirect_or_fallback(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
    let alias = req.path().trim_start_matches('/');

    if let Ok(long_url) = app_state.links.resolve(alias).await {
        let clicks = app_state.clicks.clone();
        let alias = alias.to_string();
        actix_web::rt::spawn(async move {
            if let Err(e) = clicks.record(&alias).await {
                log::warn!("failed to record click for {alias}: {e}");
            }
        });

        return Ok(HttpResponse::Found()
            .append_header((header::LOCATION, long_url))
            .finish());
    }

    serve_static(app_state.get_ref(), alias, &req).await
}

async fn serve_static(
    app_state: &AppState,
    rel_path: &str,
    req: &HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
    // The path comes straight off the wire; never let it climb out of
    // the static directory.
    if rel_path.split('/').any(|segment| segment == "..") {
        return Ok(HttpResponse::NotFound().body("Short URL not found"));
    }

    let rel_path = if rel_path.is_empty() { "index.html" } else { rel_path };
    match NamedFile::open_async(app_state.static_dir.join(rel_path)).await {
        Ok(file) => Ok(file.into_response(req)),
        Err(_) => Ok(HttpResponse::NotFound().body("Short URL not found")),
    }
}

/// List the aliases owned by the session's user, space-joined.
pub async fn get_links(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = current_session(&req)?;
    let links = app_state.links.list_owned(&session.username).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain")
        .body(links.join(" ")))
}

/// Delete a link, its click history, and its entry in the session
/// user's list. The body is the raw alias text.
pub async fn remove_link(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    body: String,
) -> Result<HttpResponse, AppError> {
    let session = current_session(&req)?;
    let alias = leading_alias(&body)?;

    app_state.links.remove(alias, &session.username).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Long URL plus the 30-day click histogram for an alias.
pub async fn get_link_data(
    app_state: web::Data<AppState>,
    body: String,
) -> Result<HttpResponse, AppError> {
    let alias = leading_alias(&body)?;

    let long_url = app_state.links.resolve(alias).await?;
    let num_clicks = app_state.clicks.histogram(alias).await?;

    Ok(HttpResponse::Ok().json(LinkDataResponse {
        long_url,
        num_clicks,
    }))
}

/// The first six characters of the body, which is where clients put the
/// alias. Shorter bodies are rejected instead of sliced past the end.
fn leading_alias(body: &str) -> Result<&str, AppError> {
    body.get(..ALIAS_LENGTH)
        .ok_or_else(|| AppError::Validation("Short URL required in request body".to_string()))
}
