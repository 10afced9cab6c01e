use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;

use super::errors::{AuthError, UserRegistrationError};
use super::schemas::{AuthData, AuthenticateRequest, CreateUserAccount};
use super::utils::{get_auth_data, get_user, register_user, validate_user_credentials};
use crate::configuration::SecretConfig;
use crate::schemas::GenericResponse;

#[utoipa::path(
    post,
    path = "/user/register",
    tag = "User",
    description = "Registers a donor, NGO or volunteer account.",
    request_body(content = CreateUserAccount, description = "Request Body"),
    responses(
        (status=200, description= "Account created", body= GenericResponse<TupleUnit>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "user registration", skip(pool, body), fields(email = %body.email))]
pub async fn register(
    body: CreateUserAccount,
    pool: web::Data<PgPool>,
) -> Result<web::Json<GenericResponse<()>>, UserRegistrationError> {
    register_user(&pool, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully registered account",
        Some(()),
    )))
}

#[utoipa::path(
    post,
    path = "/user/login",
    tag = "User",
    description = "Authenticates an account and issues a bearer token.",
    request_body(content = AuthenticateRequest, description = "Request Body"),
    responses(
        (status=200, description= "Authenticated", body= GenericResponse<AuthData>),
        (status=401, description= "Invalid credentials", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "user login", skip(pool, body, secret), fields(email = %body.email))]
pub async fn login(
    body: AuthenticateRequest,
    pool: web::Data<PgPool>,
    secret: web::Data<SecretConfig>,
) -> Result<web::Json<GenericResponse<AuthData>>, AuthError> {
    let user_id = validate_user_credentials(&pool, &body.email, body.password).await?;
    let user = get_user(user_id, &pool)
        .await?
        .ok_or_else(|| AuthError::UnexpectedError(anyhow::anyhow!("User vanished after login")))?;
    let auth_data = get_auth_data(user, &secret.jwt)?;
    Ok(web::Json(GenericResponse::success(
        "Successfully authenticated",
        Some(auth_data),
    )))
}
