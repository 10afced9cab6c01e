use crate::schemas::GenericResponse;
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AuthError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            AuthError::InvalidCredentials(_) => "Invalid credentials.".to_string(),
            AuthError::UnexpectedError(inner_error) => inner_error.to_string(),
            AuthError::DatabaseError(message, _err) => message.to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}

#[derive(thiserror::Error)]
pub enum UserRegistrationError {
    #[error("Duplicate email")]
    DuplicateEmail(#[source] anyhow::Error),
    #[error("Duplicate username")]
    DuplicateUsername(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for UserRegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UserRegistrationError {
    fn status_code(&self) -> StatusCode {
        match self {
            UserRegistrationError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            UserRegistrationError::DuplicateUsername(_) => StatusCode::BAD_REQUEST,
            UserRegistrationError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UserRegistrationError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            UserRegistrationError::DuplicateEmail(_) => "Duplicate email".to_string(),
            UserRegistrationError::DuplicateUsername(_) => "Duplicate username".to_string(),
            UserRegistrationError::UnexpectedError(inner_error) => inner_error.to_string(),
            UserRegistrationError::DatabaseError(message, _err) => message.to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}
