use crate::services::store_error_response;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::requests::ActivityQuery;

pub async fn process(store: web::Data<Store>, query: web::Query<ActivityQuery>) -> impl Responder {
    match store.recent_activity(query.limit(), Utc::now().naive_utc()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => store_error_response(&e, "No records"),
    }
}
