//! `GET /health`: liveness plus a database round trip.

use crate::store::Store;
use actix_web::{web, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use common::responses::HealthResponse;

pub async fn process(store: web::Data<Store>) -> impl Responder {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    match store.ping() {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "UP".into(),
            db: "CONNECTED".into(),
            error: None,
            timestamp,
        }),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(HealthResponse {
                status: "DOWN".into(),
                db: "DISCONNECTED".into(),
                error: Some(e.to_string()),
                timestamp,
            })
        }
    }
}
