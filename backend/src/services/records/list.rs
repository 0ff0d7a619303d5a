use super::not_found;
use crate::entities::EntityKind;
use crate::error::StoreError;
use crate::services::store_error_response;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ListQuery;
use common::responses::ListResponse;

/// `GET /api/v1/{import,export}?page&limit`
pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<EntityKind>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match list_page(&store, **kind, &query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => store_error_response(&e, &not_found(**kind)),
    }
}

fn list_page(
    store: &Store,
    kind: EntityKind,
    query: &ListQuery,
) -> Result<ListResponse, StoreError> {
    let (data, total) = store.list_records(kind.def(), query.limit(), query.offset())?;
    Ok(ListResponse {
        data,
        total,
        page: query.page(),
        limit: query.limit(),
    })
}
