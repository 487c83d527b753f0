use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;

use kortlank::routes::init_routes;
use kortlank::state::app_state::AppState;
use kortlank::store::redis::RedisStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| String::from("8080"))
        .parse::<u16>()
        .expect("PORT must be a number");
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://127.0.0.1:6379"));
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| String::from("./static"));
    let frontend_origin = std::env::var("FRONTEND_ORIGIN")
        .unwrap_or_else(|_| String::from("http://localhost:3000"));

    // Connect to the backing store before accepting any traffic.
    let store = match RedisStore::connect(&redis_url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error connecting to Redis at {redis_url}: {e}");
            std::process::exit(1);
        }
    };

    // Create shared state
    let app_state = web::Data::new(AppState::new(Arc::new(store), PathBuf::from(static_dir)));

    log::info!("Listening on http://127.0.0.1:{port}");

    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        // The frontend runs on its own origin during development and
        // sends the session cookie, so credentials must be allowed.
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(http::header::CONTENT_TYPE)
            .supports_credentials()
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
