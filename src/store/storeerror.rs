use thiserror::Error;

use crate::markup::configurationerror::ConfigurationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
    #[error("markup row {0} not found")]
    RowNotFound(i64),
    #[error("invalid markup configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl StoreError {
    pub fn from_json_or_json_parse_error<T>(json_value: serde_json::Value) -> Result<T, Self>
        where T: for<'a> serde::Deserialize<'a> {
        serde_json::from_value(json_value).map_err(StoreError::JsonParseError)
    }
}
