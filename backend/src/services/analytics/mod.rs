//! Chart data under `/api/v1/analytics`. Every handler is a read-only
//! aggregate over both record tables.

use super::{store_error_response, API_PREFIX};
use crate::error::StoreError;
use crate::store::Store;
use actix_web::web::{self, get, scope};
use actix_web::{HttpResponse, Scope};
use chrono::Utc;
use serde::Serialize;

pub fn configure_routes() -> Scope {
    scope(&format!("{}/analytics", API_PREFIX))
        .route("/overview", get().to(overview))
        .route("/forwarders", get().to(forwarders))
        .route("/containers", get().to(containers))
        .route("/totals", get().to(totals))
        .route("/status", get().to(status))
}

fn respond<T: Serialize>(result: Result<T, StoreError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => store_error_response(&e, "No records"),
    }
}

/// Monthly record volume for the last six months.
async fn overview(store: web::Data<Store>) -> HttpResponse {
    respond(store.monthly_overview(Utc::now().date_naive()))
}

async fn forwarders(store: web::Data<Store>) -> HttpResponse {
    respond(store.forwarder_counts())
}

async fn containers(store: web::Data<Store>) -> HttpResponse {
    respond(store.container_sizes())
}

async fn totals(store: web::Data<Store>) -> HttpResponse {
    respond(store.analytics_totals(Utc::now().date_naive()))
}

/// Import documentation status buckets.
async fn status(store: web::Data<Store>) -> HttpResponse {
    respond(store.document_status())
}
