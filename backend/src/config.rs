use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;

/// Runtime settings, read from the environment (and a `.env` file when one
/// is present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Where uploaded workbooks are spooled while they are processed.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_number(&lookup, "FREIGHT_PORT", 8080)?;
        let max_upload_mb: usize = parse_number(&lookup, "FREIGHT_MAX_UPLOAD_MB", 10)?;

        Ok(Self {
            host: lookup("FREIGHT_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            db_path: lookup("FREIGHT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("freight.sqlite")),
            upload_dir: lookup("FREIGHT_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

fn parse_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
