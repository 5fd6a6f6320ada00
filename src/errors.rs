use thiserror::Error;

use crate::models::PropertyId;
use crate::validation::ValidationErrors;

/// Failures surfaced by the listing service and store
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("property {0} not found")]
    NotFound(PropertyId),

    #[error("property id {0} is already taken")]
    IdConflict(PropertyId),

    #[error("invalid property: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unknown {kind} '{value}'")]
    InvalidLabel { kind: &'static str, value: String },

    #[error("listing data I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("listing data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for listing operations
pub type ListingResult<T> = Result<T, ListingError>;
