use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error or acknowledgement body: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by the bulk upload endpoint on partial or full success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Rows inserted.
    pub count: usize,
    /// Non-blank data rows seen.
    pub total: usize,
}

/// One page of stored records, each rendered as a JSON object keyed by
/// canonical column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Map<String, Value>>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"UP"` or `"DOWN"`.
    pub status: String,
    /// `"CONNECTED"` or `"DISCONNECTED"`.
    pub db: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 UTC.
    pub timestamp: String,
}
