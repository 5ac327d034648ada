//! Error handling for the DocSync backend client
//!
//! One error type covers every operation in this crate. Transport and
//! serialization errors convert automatically via `From`; a response with a
//! non-success status becomes [`ApiError::Status`] carrying the raw body
//! text, because the UI surfaces that body verbatim to the user.

use thiserror::Error;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to the sync service
///
/// # Examples
///
/// ```
/// use docsync_api::ApiError;
///
/// let error = ApiError::Status {
///     status: 500,
///     body: "Failed to fetch drive items".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "server returned 500: Failed to fetch drive items"
/// );
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection refused, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response; `body` is the raw response text
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The event stream ended or produced an unusable frame
    #[error("event stream error: {0}")]
    Stream(String),
}

impl ApiError {
    /// The text shown to the user for this error
    ///
    /// For status errors this is the raw response body (unless it is empty),
    /// matching how the service reports failures.
    pub fn display_body(&self) -> String {
        match self {
            ApiError::Status { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_shows_raw_body() {
        let error = ApiError::Status {
            status: 502,
            body: "upstream unavailable".into(),
        };
        assert_eq!(error.display_body(), "upstream unavailable");
    }

    #[test]
    fn empty_body_falls_back_to_description() {
        let error = ApiError::Status {
            status: 500,
            body: "  ".into(),
        };
        assert_eq!(error.display_body(), "server returned 500:   ");
    }
}
