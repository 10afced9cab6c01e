use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum NgoProfileError {
    #[error("An NGO profile already exists for this account")]
    DuplicateProfile(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for NgoProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<NgoProfileError> for GenericError {
    fn from(err: NgoProfileError) -> GenericError {
        match err {
            NgoProfileError::DuplicateProfile(_) => GenericError::ValidationError(
                "An NGO profile already exists for this account".to_string(),
            ),
            NgoProfileError::UnexpectedError(error) => GenericError::UnexpectedError(error),
            NgoProfileError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
        }
    }
}
