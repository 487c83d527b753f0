use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(app_state: web::Data<AppState>) -> HttpResponse {
    match app_state.store.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(_) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "success": false, "error": "Store connection failed" })),
    }
}
