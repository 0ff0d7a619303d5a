//! Dashboard summary endpoints under `/api/v1/dashboard`:
//! - `GET /stats`: record totals, this month's volume and trends.
//! - `GET /recent-activity?limit`: latest created or updated records.

mod recent_activity;
mod stats;

use super::API_PREFIX;
use actix_web::web::{get, scope};
use actix_web::Scope;

pub fn configure_routes() -> Scope {
    scope(&format!("{}/dashboard", API_PREFIX))
        .route("/stats", get().to(stats::process))
        .route("/recent-activity", get().to(recent_activity::process))
}
