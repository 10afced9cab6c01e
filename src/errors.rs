use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::schemas::GenericResponse;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum CustomJWTTokenError {
    #[error("Token expired")]
    Expired,
    #[error("{0}")]
    Invalid(String),
}

impl std::fmt::Debug for CustomJWTTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum GenericError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error("{0}")]
    SerializationError(String),
    #[error("{0}")]
    PaymentGatewayError(String),
    #[error("{0}")]
    InvalidJWT(String),
    #[error("{0}")]
    InsufficientPrivilegeError(String),
    #[error("{0}")]
    DataNotFound(String),
    #[error("{0}")]
    ConflictError(String),
}

impl std::fmt::Debug for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<serde_json::Error> for GenericError {
    fn from(err: serde_json::Error) -> Self {
        GenericError::SerializationError(err.to_string())
    }
}

impl ResponseError for GenericError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenericError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GenericError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::PaymentGatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GenericError::InvalidJWT(_) => StatusCode::UNAUTHORIZED,
            GenericError::InsufficientPrivilegeError(_) => StatusCode::FORBIDDEN,
            GenericError::DataNotFound(_) => StatusCode::GONE,
            GenericError::ConflictError(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            GenericError::ValidationError(message) => message.to_string(),
            GenericError::UnexpectedError(error) => error.to_string(),
            GenericError::DatabaseError(message, _err) => message.to_string(),
            GenericError::SerializationError(message) => message.to_string(),
            GenericError::PaymentGatewayError(message) => message.to_string(),
            GenericError::InvalidJWT(message) => message.to_string(),
            GenericError::InsufficientPrivilegeError(message) => message.to_string(),
            GenericError::DataNotFound(message) => message.to_string(),
            GenericError::ConflictError(message) => message.to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}
