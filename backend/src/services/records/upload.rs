//! `POST /api/v1/{import,export}/upload`
//!
//! Expects a multipart body with a `file` field carrying an `.xlsx` or `.xls`
//! workbook. The file is spooled to a named temp file in the configured upload
//! directory and the whole pipeline runs on tokio's blocking pool. The temp file
//! is removed when the worker drops it, whatever the outcome.

use crate::config::AppConfig;
use crate::entities::EntityKind;
use crate::error::UploadError;
use crate::ingest::ingest_workbook;
use crate::store::Store;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::upload::UploadResult;
use common::responses::{MessageResponse, UploadResponse};
use futures_util::StreamExt;
use std::io::Write;
use tempfile::NamedTempFile;

const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

pub async fn process(
    store: web::Data<Store>,
    config: web::Data<AppConfig>,
    kind: web::Data<EntityKind>,
    payload: Multipart,
) -> impl Responder {
    match upload_workbook(store.get_ref().clone(), &config, **kind, payload).await {
        Ok(result) => HttpResponse::Created().json(UploadResponse {
            message: "Bulk upload processed".to_string(),
            count: result.inserted_count,
            total: result.total_count,
        }),
        Err(e @ UploadError::TooLarge { .. }) => {
            HttpResponse::PayloadTooLarge().json(MessageResponse::new(e.to_string()))
        }
        Err(e) if e.is_client_error() => {
            HttpResponse::BadRequest().json(MessageResponse::new(e.to_string()))
        }
        Err(e) => {
            log::error!("{} upload failed: {}", kind.def().label, e);
            HttpResponse::InternalServerError().json(MessageResponse::new(e.to_string()))
        }
    }
}

/// Lower-cased extension of `filename` when it is one we accept.
fn workbook_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

async fn upload_workbook(
    mut store: Store,
    config: &AppConfig,
    kind: EntityKind,
    mut payload: Multipart,
) -> Result<UploadResult, UploadError> {
    let mut spooled: Option<NamedTempFile> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some("file") || spooled.is_some() {
            // Drain parts we do not use.
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let ext = workbook_extension(&filename).ok_or(UploadError::UnsupportedExtension(filename))?;

        // The reader picks the format from the extension.
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{}", ext))
            .tempfile_in(&config.upload_dir)?;
        let mut written = 0;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            written += chunk.len();
            if written > config.max_upload_bytes {
                return Err(UploadError::TooLarge {
                    limit: config.max_upload_bytes,
                });
            }
            file.write_all(&chunk)?;
        }
        file.flush()?;
        spooled = Some(file);
    }

    let file = spooled.ok_or(UploadError::MissingFile)?;
    let def = kind.def();
    log::info!("{} upload received ({})", def.label, file.path().display());

    let result =
        tokio::task::spawn_blocking(move || ingest_workbook(file.path(), def, &mut store)).await??;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::super::tests::mount;
    use super::*;
    use crate::entities::{EntityDef, EXPORT};
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;

    const BOUNDARY: &str = "----freight-test-boundary";

    fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        write!(
            body,
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            b = BOUNDARY,
            field = field,
            filename = filename
        )
        .unwrap();
        body.extend_from_slice(content);
        write!(body, "\r\n--{}--\r\n", BOUNDARY).unwrap();
        body
    }

    fn upload_request(entity: &str, body: Vec<u8>) -> TestRequest {
        TestRequest::post()
            .uri(&format!("/api/v1/{}/upload", entity))
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    /// A workbook carrying `def`'s template header row and the given rows.
    fn workbook_bytes(def: &EntityDef, rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let ws = workbook.add_worksheet();
        for (col, header) in def.expected_headers.iter().enumerate() {
            ws.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                ws.write_string(r as u32 + 1, col as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn extension_check() {
        assert_eq!(workbook_extension("jobs.XLSX").as_deref(), Some("xlsx"));
        assert_eq!(workbook_extension("old.xls").as_deref(), Some("xls"));
        assert_eq!(workbook_extension("jobs.csv"), None);
        assert_eq!(workbook_extension("noext"), None);
    }

    #[actix_web::test]
    async fn uploads_a_template_workbook() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let app = init_service(App::new().configure(|cfg| mount(cfg, &store, dir.path()))).await;

        let bytes = workbook_bytes(
            &EXPORT,
            &[&["1", "J-1", "INV-1", "15/03/2023"], &[], &["2", "J-2", "do", "do"]],
        );
        let req = upload_request("export", multipart_body("file", "jobs.xlsx", &bytes));
        let resp = call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: UploadResponse = read_body_json(resp).await;
        assert_eq!(body.message, "Bulk upload processed");
        assert_eq!((body.count, body.total), (2, 2));

        let records = store.all_records(&EXPORT).unwrap();
        assert_eq!(records[1]["inv_no"], "INV-1");
        assert_eq!(records[1]["inv_date"], "2023-03-15");
        // Spooled file is gone.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn rejects_bad_uploads_with_400() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let app = init_service(App::new().configure(|cfg| mount(cfg, &store, dir.path()))).await;

        let cases = [
            (multipart_body("file", "jobs.csv", b"a,b\n"), "Only Excel files"),
            (multipart_body("other", "jobs.xlsx", b"x"), "No file uploaded"),
            (
                multipart_body("file", "jobs.xlsx", b"not a workbook"),
                "Failed to parse Excel file",
            ),
            (
                multipart_body("file", "jobs.xlsx", &workbook_bytes(&EXPORT, &[])),
                "No data rows found",
            ),
        ];
        for (body, expected) in cases {
            let resp = call_service(&app, upload_request("export", body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", expected);
            let message: MessageResponse = read_body_json(resp).await;
            assert!(message.message.contains(expected), "{:?}", message.message);
        }
        assert!(store.all_records(&EXPORT).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn oversized_files_are_refused() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut config = super::super::tests::test_config(dir.path());
        config.max_upload_bytes = 16;
        let app = init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(config))
                .service(super::super::configure_routes(EntityKind::Export)),
        )
        .await;

        let body = multipart_body("file", "big.xlsx", &[0u8; 64]);
        let resp = call_service(&app, upload_request("export", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn rejects_foreign_headers() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let app = init_service(App::new().configure(|cfg| mount(cfg, &store, dir.path()))).await;

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "foo").unwrap();
        ws.write_string(1, 0, "bar").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let req = upload_request("import", multipart_body("file", "x.xlsx", &bytes));
        let resp = call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let message: MessageResponse = read_body_json(resp).await;
        assert!(message.message.starts_with("Invalid headers. Please use the template file."));
    }
}
