//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::requests::StatRequest;

/// Body of `POST /requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatBatch {
    pub stat_requests: Vec<StatRequest>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
