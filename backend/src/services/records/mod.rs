//! Import and export record endpoints.
//!
//! Both record types share every handler; the scope injects the
//! [`EntityKind`] the handlers resolve their table and mapping from.
//!
//! Routes, relative to `/api/v1/{import,export}`:
//! - `GET ""`: paginated listing, newest first.
//! - `POST ""`: create one record from a JSON object.
//! - `PUT /{id}`, `DELETE /{id}`: update or remove one record.
//! - `POST /upload`: bulk upload of an Excel workbook (`file` field).
//! - `GET /template`: the Excel template uploads are validated against.
//! - `GET /csv`: every stored record as CSV.

mod body;
mod create;
mod csv;
mod delete;
mod list;
mod template;
mod update;
mod upload;

use super::API_PREFIX;
use crate::entities::EntityKind;
use actix_web::web::{self, delete, get, post, put, scope};
use actix_web::Scope;

fn path_segment(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Import => "import",
        EntityKind::Export => "export",
    }
}

/// Not-found message for `kind`, e.g. `"Export record not found"`.
fn not_found(kind: EntityKind) -> String {
    format!("{} record not found", kind.def().label)
}

pub fn configure_routes(kind: EntityKind) -> Scope {
    scope(&format!("{}/{}", API_PREFIX, path_segment(kind)))
        .app_data(web::Data::new(kind))
        .route("/upload", post().to(upload::process))
        .route("/template", get().to(template::process))
        .route("/csv", get().to(csv::process))
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
}
