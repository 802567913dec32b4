use crate::editor::EditorPhase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    /// Caught before any network call is made.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] kimyo_client::Error),

    /// An action was requested that the editor's current phase does not
    /// allow, e.g. confirming a save that was never requested.
    #[error("action not allowed while {0}")]
    Phase(EditorPhase),

    #[error("unknown entity id: {0}")]
    UnknownId(i64),
}

impl From<validator::ValidationErrors> for CmsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CmsError::Validation(errors.to_string())
    }
}
