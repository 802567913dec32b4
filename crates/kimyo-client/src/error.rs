use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("received invalid json data")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] InternalError),

    /// The backend answered with `success: false`; carries the server's
    /// message when it sent one.
    #[error("{0}")]
    Api(String),
}

#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    Transport(#[from] kimyo_http::Error),

    #[error(transparent)]
    Http(#[from] http::Error),
}
