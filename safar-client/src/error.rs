/// Client-side error taxonomy. Authentication failures clear the local
/// session; everything else is surfaced to the caller and leaves the
/// application in a continuable state.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication required - please log in again")]
    Unauthorized,
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
