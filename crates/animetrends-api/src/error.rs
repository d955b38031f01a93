use thiserror::Error;

/// Errors from the AnimeTrends service client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}{}", fmt_message(.message))]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("title {0:?} cannot be sent as a URL path segment")]
    InvalidTitle(String),
}

fn fmt_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({message})")
    }
}
