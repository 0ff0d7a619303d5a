pub mod field;
pub mod stats;
pub mod upload;
