use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown timezone `{0}` (expected an IANA name such as `Europe/Paris`)")]
    UnknownTimezone(String),
    #[error("invalid reschedule `{0}` (expected `POST_ID=2024-03-15T09:30:00Z`)")]
    InvalidReschedule(String),
    #[error("date out of range")]
    DateOutOfRange,
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Ways connecting a social account can fail.
///
/// Every variant is reported to the user the same way.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("no authorization code in redirect")]
    MissingCode,
    #[error("token exchange request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("token exchange returned an unreadable body: {0}")]
    InvalidResponse(#[source] reqwest::Error),
    #[error("token exchange rejected: {0}")]
    Rejected(String),
}
