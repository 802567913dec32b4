use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("reqwest client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request failed with status {status}")]
    Status {
        status: http::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Http(#[from] http::Error),
}
