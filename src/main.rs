use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use deckhand::config::AppConfig;
use deckhand::storage::{BlobStore, LocalBlobStore};
use deckhand::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    db::ensure_database_dir(&config.database_url)?;
    std::fs::create_dir_all(&config.blob_dir)?;

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to open database: {e}")))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.blob_dir, &config.blob_public_path));
    let blobs = web::Data::from(blobs);
    let pool = web::Data::new(pool);

    log::info!("Database: {}", config.database_url);
    log::info!("Blob store: {} (served at {})", config.blob_dir.display(), config.blob_public_path);
    log::info!("Starting server at http://{}", config.bind_addr);

    let bind_addr = config.bind_addr.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(pool.clone())
            .app_data(blobs.clone())
            .configure(|cfg| handlers::configure(cfg, &config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
