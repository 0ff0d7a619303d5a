use crate::services::store_error_response;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;

pub async fn process(store: web::Data<Store>) -> impl Responder {
    match store.dashboard_stats(Utc::now().date_naive()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => store_error_response(&e, "No records"),
    }
}
