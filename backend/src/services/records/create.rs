use super::body::record_from_json;
use super::not_found;
use crate::entities::EntityKind;
use crate::error::StoreError;
use crate::services::store_error_response;
use crate::store::{Record, Store};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{Map, Value};

/// `POST /api/v1/{import,export}`: stores one record and answers 201 with it.
pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<EntityKind>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    match create_record(&store, **kind, &body) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => store_error_response(&e, &not_found(**kind)),
    }
}

fn create_record(
    store: &Store,
    kind: EntityKind,
    body: &Map<String, Value>,
) -> Result<Record, StoreError> {
    let def = kind.def();
    let id = store.insert_record(def, &record_from_json(def, body))?;
    log::info!("{} record {} created", def.label, id);
    store.get_record(def, id)
}
