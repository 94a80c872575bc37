use thiserror::Error;

/// Error taxonomy for the whole core crate.
///
/// Upstream provider failures are deliberately *not* represented here for
/// search/extraction flows: those degrade to empty results inside the
/// services. `ExternalServiceError` only surfaces where an upstream call
/// is the whole point of the operation and there is nothing to render
/// without it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("resource not found")]
    NotFound,

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("internal server error")]
    InternalServerError,
}
