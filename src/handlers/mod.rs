pub mod admin_handlers;
pub mod export_handlers;
pub mod presentation_handlers;
pub mod slide_handlers;

use actix_web::web;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Register every route, extractor config and file service.
///
/// Shared by `main` and the integration tests. The pool and blob store are
/// expected as app data.
pub fn configure(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    let json_config = web::JsonConfig::default()
        .limit(config.max_body_bytes)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into());
    let query_config =
        web::QueryConfig::default().error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into());

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(actix_files::Files::new("/static", &config.static_dir))
        .service(actix_files::Files::new(&config.blob_public_path, &config.blob_dir))
        // JSON API
        .route("/presentations", web::get().to(presentation_handlers::list))
        .route("/presentations", web::post().to(presentation_handlers::create))
        .route("/slides", web::get().to(slide_handlers::list))
        .route("/slides", web::post().to(slide_handlers::create))
        .route("/ppt", web::get().to(export_handlers::download))
        // Admin UI
        .route("/", web::get().to(admin_handlers::root_redirect))
        .route("/admin", web::get().to(admin_handlers::viewer))
        .route("/admin/presentations", web::get().to(admin_handlers::presentation_form))
        .route("/admin/slides", web::get().to(admin_handlers::slide_form))
        // Must stay last
        .default_service(web::to(admin_handlers::not_found));
}
