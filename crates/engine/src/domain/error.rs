// crates/engine/src/domain/error.rs
use thiserror::Error;

/// A field value outside the domain the backend protocol knows about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {field} value: {value:?}")]
pub struct UnsupportedValue {
  pub field: &'static str,
  pub value: String,
}

impl UnsupportedValue {
  pub fn new(field: &'static str, value: impl Into<String>) -> Self {
    Self { field, value: value.into() }
  }
}

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("mapping: {0}")]
  Mapping(#[from] UnsupportedValue),

  #[error("hashing unavailable: {0}")]
  HashingUnavailable(String),

  #[error("remote failure: {0}")]
  RemoteFailure(String),

  #[error("malformed signature block: {0}")]
  MalformedSignatureBlock(String),

  #[error("configuration: {0}")]
  Config(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
