use super::body::record_from_json;
use super::not_found;
use crate::entities::EntityKind;
use crate::error::StoreError;
use crate::services::store_error_response;
use crate::store::{Record, Store};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{Map, Value};

/// `PUT /api/v1/{import,export}/{id}`: replaces every column of the record.
pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<EntityKind>,
    id: web::Path<i64>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    match update_record(&store, **kind, *id, &body) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => store_error_response(&e, &not_found(**kind)),
    }
}

fn update_record(
    store: &Store,
    kind: EntityKind,
    id: i64,
    body: &Map<String, Value>,
) -> Result<Record, StoreError> {
    let def = kind.def();
    store.update_record(def, id, &record_from_json(def, body))?;
    store.get_record(def, id)
}
