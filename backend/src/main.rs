mod config;
mod entities;
mod error;
mod ingest;
mod services;
mod store;

use crate::config::AppConfig;
use crate::entities::EntityKind;
use crate::store::Store;
use actix_web::{web, App, HttpResponse, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::io;

fn to_io_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        to_io_error(e)
    })?;
    std::fs::create_dir_all(&config.upload_dir)?;

    let store = Store::open(&config.db_path).map_err(|e| {
        error!("Cannot open database {}: {}", config.db_path.display(), e);
        to_io_error(e)
    })?;
    info!("Using database {}", config.db_path.display());

    let bind = (config.host.clone(), config.port);
    info!("Server running at http://{}:{}", bind.0, bind.1);

    let max_upload_bytes = config.max_upload_bytes;
    let store = web::Data::new(store);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(max_upload_bytes))
            .app_data(web::PayloadConfig::default().limit(max_upload_bytes))
            .app_data(store.clone())
            .app_data(config.clone())
            .route("/health", web::get().to(services::health::process))
            .service(services::records::configure_routes(EntityKind::Import))
            .service(services::records::configure_routes(EntityKind::Export))
            .service(services::dashboard::configure_routes())
            .service(services::analytics::configure_routes())
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(common::responses::MessageResponse::new("Not Found"))
            }))
    })
    .bind(bind)?
    .run()
    .await
}
