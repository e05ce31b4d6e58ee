use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Transaction fetch failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("CSV rendering failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("ZIP bundling failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("View definition parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;
