use super::not_found;
use crate::entities::EntityKind;
use crate::services::store_error_response;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder};
use common::responses::MessageResponse;

/// `DELETE /api/v1/{import,export}/{id}`
pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<EntityKind>,
    id: web::Path<i64>,
) -> impl Responder {
    let def = kind.def();
    match store.delete_record(def, *id) {
        Ok(()) => {
            log::info!("{} record {} deleted", def.label, id);
            HttpResponse::Ok().json(MessageResponse::new(format!(
                "{} record deleted successfully",
                def.label
            )))
        }
        Err(e) => store_error_response(&e, &not_found(**kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::mount;
    use crate::entities::IMPORT;
    use crate::ingest::assemble::assemble;
    use crate::store::Store;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::responses::MessageResponse;

    #[actix_web::test]
    async fn deletes_once() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_record(&IMPORT, &assemble(&IMPORT, &[], 0)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let app =
            test::init_service(App::new().configure(|cfg| mount(cfg, &store, dir.path()))).await;

        let uri = format!("/api/v1/import/{}", id);
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let body: MessageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "Import record deleted successfully");

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
