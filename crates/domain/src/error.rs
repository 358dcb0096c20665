/// Shared error type used across all findoc crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("storage: {0}")]
    Storage(String),

    /// Missing or malformed client input. Safe to surface verbatim.
    #[error("{0}")]
    Validation(String),

    /// Ownership check failed or the record does not exist. The caller
    /// only ever learns "not found".
    #[error("not found")]
    NotFound,

    /// The owner has no summarized documents to work from. Distinct from
    /// an upstream failure so the API can answer with a client error.
    #[error("no documents found for generating suggestions")]
    NoDocuments,

    #[error("auth: {0}")]
    Auth(String),

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    /// True when the error is the caller's fault (4xx-class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::NotFound | Error::NoDocuments | Error::Auth(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
