use thiserror::Error;

/// Fatal upload errors. All of them are raised before the first row is
/// inserted, so a failed upload never leaves partial data behind.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to parse Excel file: {0}")]
    UnreadableWorkbook(String),

    #[error(
        "Invalid headers. Please use the template file. \
         ({matched} of {expected} expected columns recognised)"
    )]
    InvalidHeader { matched: usize, expected: usize },

    #[error("No data rows found in the Excel file")]
    EmptyData,
}

impl From<calamine::Error> for IngestError {
    fn from(e: calamine::Error) -> Self {
        IngestError::UnreadableWorkbook(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,

    #[error("record not found")]
    NotFound,
}

/// A single row that could not be stored. Logged and skipped by the bulk
/// insert loop; never aborts the batch.
#[derive(Error, Debug)]
#[error("row {line}: {source}")]
pub struct RowInsertError {
    /// 1-based line in the uploaded sheet.
    pub line: usize,
    #[source]
    pub source: StoreError,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Everything that can stop a bulk upload request before a summary is
/// produced.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Only Excel files (.xlsx, .xls) are allowed, got {0:?}")]
    UnsupportedExtension(String),

    #[error("File exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    #[error("Malformed upload: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl UploadError {
    /// Client mistakes are 400; the rest are server faults.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UploadError::Io(_) | UploadError::Worker(_))
    }
}
