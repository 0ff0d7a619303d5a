//! Summary statistics served to the dashboard and analytics views.
//!
//! Field names are serialized in camelCase to match what the dashboard
//! client consumes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_imports: i64,
    pub total_exports: i64,
    pub this_month_total: i64,
    /// Import records still missing the N.N copy or the original documents.
    pub pending_reviews: i64,
    /// Month-over-month change, in percent.
    pub import_trend: i64,
    pub export_trend: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Import,
    Export,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub job_no: String,
    /// `"Added"` or `"Updated"`.
    pub action: String,
    /// Human readable age, e.g. `"3 hours ago"`.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub import: i64,
    pub export: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSizeCount {
    pub name: String,
    pub import: i64,
    pub export: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTotals {
    pub total_shipments: i64,
    pub import_volume: i64,
    pub export_volume: i64,
    /// Sum of import invoice values and export FOB values.
    pub total_value: f64,
    pub total_trend: i64,
    pub import_trend: i64,
    pub export_trend: i64,
}
