/// Failure of a call to the incident service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// User-facing text. Every failure of a view collapses to one message.
pub mod messages {
    pub const LIST_FAILED: &str = "Failed to load incidents. Please try again.";
    pub const DETAIL_FAILED: &str = "Failed to load incident details.";
    pub const CREATE_FAILED: &str = "Failed to create incident. Please check your inputs.";
    pub const SAVE_FAILED: &str = "Failed to save changes.";
    pub const NO_RESULTS: &str = "No incidents found matching your criteria.";
}
