pub mod auth_handlers;
pub mod health_handlers;
pub mod link_handlers;

use actix_web::{HttpMessage, HttpRequest};

use crate::errors::AppError;
use crate::services::session::Session;

/// Fetches the session the `SessionAuth` middleware stored in the
/// request extensions.
pub(crate) fn current_session(req: &HttpRequest) -> Result<Session, AppError> {
    req.extensions()
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Auth("Invalid session".to_string()))
}
