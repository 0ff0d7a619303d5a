//! HTTP surface. Each sub-module exposes a `configure_routes()` returning the
//! Actix scope it owns; handlers are named `process` and map their inner
//! `Result` onto an `HttpResponse`.

pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod records;

use crate::error::StoreError;
use actix_web::HttpResponse;
use common::responses::MessageResponse;

/// Prefix shared by every versioned API scope.
pub const API_PREFIX: &str = "/api/v1";

/// Maps a store failure onto the response the API reports for it.
pub(crate) fn store_error_response(e: &StoreError, not_found: &str) -> HttpResponse {
    match e {
        StoreError::NotFound => HttpResponse::NotFound().json(MessageResponse::new(not_found)),
        other => {
            log::error!("Store failure: {}", other);
            HttpResponse::InternalServerError().json(MessageResponse::new(other.to_string()))
        }
    }
}
