//! `GET /api/v1/{import,export}/template`
//!
//! Serves an `.xlsx` whose header row is exactly the list uploads are
//! validated against, so a filled-in template always passes the check.

use super::path_segment;
use crate::entities::{EntityDef, EntityKind};
use actix_web::{web, HttpResponse, Responder};
use common::responses::MessageResponse;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub(crate) const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn process(kind: web::Data<EntityKind>) -> impl Responder {
    match build_template(kind.def()) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(XLSX_MIME)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}_template.xlsx\"", path_segment(**kind)),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("Failed to build {} template: {}", kind.def().label, e);
            HttpResponse::InternalServerError().json(MessageResponse::new(e.to_string()))
        }
    }
}

pub fn build_template(def: &EntityDef) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(def.sheet_name)?;

    for (col, title) in def.expected_headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, title.len().max(12) as f64 + 2.0)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EXPORT, IMPORT};
    use crate::ingest::headers::validate_headers;
    use crate::ingest::workbook::read_workbook;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::App;
    use std::io::Write;

    #[test]
    fn template_round_trips_through_the_validator() {
        for def in [&IMPORT, &EXPORT] {
            let bytes = build_template(def).unwrap();
            let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
            file.write_all(&bytes).unwrap();

            let sheet = read_workbook(file.path()).unwrap();
            assert_eq!(sheet.headers, def.expected_headers);
            assert!(sheet.rows.is_empty());
            validate_headers(&sheet.headers, def.expected_headers).unwrap();
        }
    }

    #[actix_web::test]
    async fn serves_an_attachment() {
        let app = init_service(
            App::new().configure(|cfg| {
                let store = crate::store::Store::open_in_memory().unwrap();
                super::super::tests::mount(cfg, &store, &std::env::temp_dir())
            }),
        )
        .await;
        let req = TestRequest::get().uri("/api/v1/import/template").to_request();
        let resp = call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(resp.headers().get("content-type").unwrap(), XLSX_MIME);
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("import_template.xlsx"));
        let body = read_body(resp).await;
        assert!(body.starts_with(b"PK"));
    }
}
