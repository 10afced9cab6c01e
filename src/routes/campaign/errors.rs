use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum CampaignError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Campaign not found")]
    NotFound,
    #[error("Campaign does not belong to this NGO")]
    NotOwner,
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CampaignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<CampaignError> for GenericError {
    fn from(err: CampaignError) -> GenericError {
        match err {
            CampaignError::ValidationError(message) => GenericError::ValidationError(message),
            CampaignError::NotFound => {
                GenericError::DataNotFound("Campaign not found".to_string())
            }
            CampaignError::NotOwner => GenericError::InsufficientPrivilegeError(
                "Campaign does not belong to this NGO".to_string(),
            ),
            CampaignError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
            CampaignError::UnexpectedError(error) => GenericError::UnexpectedError(error),
        }
    }
}
