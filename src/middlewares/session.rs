use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;
use crate::state::app_state::AppState;

pub const SESSION_COOKIE: &str = "sessionKey";

/// Guards routes that require an authenticated session. Resolves the
/// `sessionKey` cookie against the session store and puts the matching
/// `Session` into the request extensions for handlers to pick up.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware { service }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // A request without the cookie never had a session; that's a
        // malformed request rather than a failed authentication.
        let cookie = match req.cookie(SESSION_COOKIE) {
            Some(cookie) => cookie,
            None => {
                return Box::pin(async move {
                    let resp =
                        AppError::Validation("sessionKey cookie required".to_string())
                            .error_response();
                    Ok(req.into_response(resp).map_into_right_body())
                });
            }
        };

        let session = req
            .app_data::<web::Data<AppState>>()
            .and_then(|state| state.sessions.get(cookie.value()));

        match session {
            Some(session) => {
                req.extensions_mut().insert(session);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            None => Box::pin(async move {
                let resp = AppError::Auth("Invalid session".to_string()).error_response();
                Ok(req.into_response(resp).map_into_right_body())
            }),
        }
    }
}
