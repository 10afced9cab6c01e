use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum PaymentOrderError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Payment order not found")]
    NotFound,
    #[error("Payment order belongs to a different account")]
    NotOwner,
    #[error("{0}")]
    GatewayError(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PaymentOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<PaymentOrderError> for GenericError {
    fn from(err: PaymentOrderError) -> GenericError {
        match err {
            PaymentOrderError::ValidationError(message) => GenericError::ValidationError(message),
            PaymentOrderError::NotFound => {
                GenericError::DataNotFound("Payment order not found".to_string())
            }
            PaymentOrderError::NotOwner => GenericError::InsufficientPrivilegeError(
                "Payment order belongs to a different account".to_string(),
            ),
            PaymentOrderError::GatewayError(message) => {
                GenericError::PaymentGatewayError(message)
            }
            PaymentOrderError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
            PaymentOrderError::UnexpectedError(error) => GenericError::UnexpectedError(error),
        }
    }
}
