//! HTTP surface: routes, CORS policy, and JSON body handling.

pub mod handlers;

use crate::Error;
use actix_cors::Cors;
use actix_web::{http::header, web};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::root)).service(
        web::scope("/api/v1")
            .service(
                web::resource("/dalle")
                    .route(web::get().to(handlers::generation_status))
                    .route(web::post().to(handlers::generate_image)),
            )
            .service(web::resource("/post").route(web::post().to(handlers::create_post))),
    );
}

/// CORS middleware admitting only the configured origins.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins {
        if origin == "*" {
            tracing::warn!("Ignoring wildcard CORS origin; origins must be listed explicitly");
            continue;
        }
        cors = cors.allowed_origin(origin);
    }

    cors.block_on_origin_mismatch(true)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

/// JSON extractor settings: body ceiling and envelope-shaped parse errors.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            tracing::debug!("Rejected JSON body: {}", err);
            Error::InvalidInput(format!("Invalid JSON body: {}", err)).into()
        })
}
