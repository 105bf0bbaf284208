use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}
