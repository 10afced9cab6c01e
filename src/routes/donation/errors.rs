use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum DonationError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Donation not found")]
    NotFound,
    #[error("Donation does not belong to this NGO")]
    NotOwner,
    #[error("Donation is already {0} and cannot change further")]
    TerminalState(String),
    #[error("{0}")]
    InvalidTransition(String),
    #[error("Donation was modified by another request, refresh and retry")]
    ConcurrentUpdate,
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for DonationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<DonationError> for GenericError {
    fn from(err: DonationError) -> GenericError {
        match err {
            DonationError::ValidationError(message) => GenericError::ValidationError(message),
            DonationError::NotFound => GenericError::DataNotFound("Donation not found".to_string()),
            DonationError::NotOwner => GenericError::InsufficientPrivilegeError(
                "Donation does not belong to this NGO".to_string(),
            ),
            DonationError::TerminalState(status) => GenericError::ConflictError(format!(
                "Donation is already {} and cannot change further",
                status
            )),
            DonationError::InvalidTransition(message) => GenericError::ValidationError(message),
            DonationError::ConcurrentUpdate => GenericError::ConflictError(
                "Donation was modified by another request, refresh and retry".to_string(),
            ),
            DonationError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
            DonationError::UnexpectedError(error) => GenericError::UnexpectedError(error),
        }
    }
}
