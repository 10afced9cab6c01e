use anyhow::Context;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::{AuthError, UserRegistrationError};
use super::models::{StoredCredentialsModel, UserAccountModel};
use super::schemas::{AuthData, CreateUserAccount, UserAccount};
use crate::configuration::JwtConfig;
use crate::utils::{generate_jwt_token_for_user, spawn_blocking_with_tracing};

fn compute_password_hash(password: SecretString) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(password_hash)
}

fn verify_password_hash(
    expected_password_hash: String,
    password_candidate: SecretString,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(&expected_password_hash)
        .context("Failed to parse hash in PHC string format")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .map_err(|e| AuthError::InvalidCredentials(anyhow::anyhow!(e)))
}

#[tracing::instrument(name = "register user", skip(pool, user))]
pub async fn register_user(
    pool: &PgPool,
    user: &CreateUserAccount,
) -> Result<Uuid, UserRegistrationError> {
    let password = user.password.clone();
    let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to join password hashing task")
        .map_err(UserRegistrationError::UnexpectedError)??;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO user_account (username, email, display_name, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.display_name)
    .bind(&password_hash)
    .bind(user.role)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        let constraint = match &e {
            sqlx::Error::Database(db) => db.constraint().map(|s| s.to_string()),
            _ => None,
        };
        match constraint.as_deref() {
            Some("user_account_email_key") => {
                UserRegistrationError::DuplicateEmail(anyhow::Error::new(e))
            }
            Some("user_account_username_key") => {
                UserRegistrationError::DuplicateUsername(anyhow::Error::new(e))
            }
            _ => {
                tracing::error!("Failed to execute query: {:?}", e);
                UserRegistrationError::DatabaseError(
                    "Failed to save user account".to_string(),
                    anyhow::Error::new(e),
                )
            }
        }
    })?;
    Ok(user_id)
}

#[tracing::instrument(name = "validate user credentials", skip(pool, password))]
pub async fn validate_user_credentials(
    pool: &PgPool,
    email: &str,
    password: SecretString,
) -> Result<Uuid, AuthError> {
    // Fallback hash keeps the verification work constant whether or not the
    // email exists.
    let mut user_id = None;
    let mut expected_password_hash =
        "$argon2id$v=19$m=15000,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string();

    let stored = sqlx::query_as::<_, StoredCredentialsModel>(
        r#"
        SELECT id, password_hash FROM user_account
        WHERE email = $1 AND is_deleted = FALSE
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        AuthError::DatabaseError(
            "Failed to fetch stored credentials".to_string(),
            anyhow::Error::new(e),
        )
    })?;

    if let Some(stored) = stored {
        user_id = Some(stored.id);
        expected_password_hash = stored.password_hash;
    }

    spawn_blocking_with_tracing(move || verify_password_hash(expected_password_hash, password))
        .await
        .context("Failed to join password verification task")
        .map_err(AuthError::UnexpectedError)??;

    user_id.ok_or_else(|| AuthError::InvalidCredentials(anyhow::anyhow!("Unknown email")))
}

#[tracing::instrument(name = "get user", skip(pool))]
pub async fn get_user(user_id: Uuid, pool: &PgPool) -> Result<Option<UserAccount>, anyhow::Error> {
    let row = sqlx::query_as::<_, UserAccountModel>(
        r#"
        SELECT id, username, email, display_name, role, is_active, is_deleted
        FROM user_account WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching user account")
    })?;
    Ok(row.map(UserAccountModel::into_schema))
}

pub fn get_auth_data(user: UserAccount, jwt: &JwtConfig) -> Result<AuthData, anyhow::Error> {
    let token = generate_jwt_token_for_user(user.id, jwt.expiry_hours, &jwt.secret)?;
    Ok(AuthData { user, token })
}
