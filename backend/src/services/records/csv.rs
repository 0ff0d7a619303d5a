//! `GET /api/v1/{import,export}/csv`: every record, oldest first, in
//! canonical column order.

use super::path_segment;
use crate::entities::{EntityDef, EntityKind};
use crate::store::{Record, Store};
use actix_web::{web, HttpResponse, Responder};
use common::responses::MessageResponse;
use serde_json::Value;

pub async fn process(store: web::Data<Store>, kind: web::Data<EntityKind>) -> impl Responder {
    let def = kind.def();
    match store
        .all_records(def)
        .map_err(Into::into)
        .and_then(|records| write_csv(def, &records))
    {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}_data.csv\"", path_segment(**kind)),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("{} CSV export failed: {}", def.label, e);
            HttpResponse::InternalServerError().json(MessageResponse::new(e.to_string()))
        }
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn write_csv(def: &EntityDef, records: &[Record]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut columns = vec!["id"];
    columns.extend(def.column_names());
    columns.extend(["created_at", "updated_at"]);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|c| cell_text(record.get(*c))))?;
    }
    Ok(writer.into_inner().map_err(|e| e.error().to_string())?)
}
