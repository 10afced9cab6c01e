use crate::errors::CustomJWTTokenError;
use crate::schemas::JWTClaims;
use actix_web::rt::task::JoinHandle;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm as JWTAlgorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

pub fn fmt_json<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_string(value) {
        Ok(json) => write!(f, "{}", json),
        Err(_) => Err(fmt::Error),
    }
}

pub fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    actix_web::rt::task::spawn_blocking(move || current_span.in_scope(f))
}

#[tracing::instrument(name = "Generate JWT token for user", skip(secret))]
pub fn generate_jwt_token_for_user(
    user_id: Uuid,
    expiry_hours: i64,
    secret: &SecretString,
) -> Result<String, anyhow::Error> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(expiry_hours))
        .expect("valid timestamp")
        .timestamp();
    let claims = JWTClaims {
        sub: user_id,
        exp: expiration as usize,
    };
    let header = Header::new(JWTAlgorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    encode(&header, &claims, &encoding_key)
        .map_err(|e| anyhow::anyhow!("Failed to generate JWT token: {}", e))
}

pub fn decode_token<T: Into<String>>(
    token: T,
    secret: &SecretString,
) -> Result<Uuid, CustomJWTTokenError> {
    let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let decoded = decode::<JWTClaims>(
        &token.into(),
        &decoding_key,
        &Validation::new(JWTAlgorithm::HS256),
    );
    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(CustomJWTTokenError::Expired),
            _ => Err(CustomJWTTokenError::Invalid("Invalid Token".to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_token, generate_jwt_token_for_user};
    use crate::errors::CustomJWTTokenError;
    use secrecy::SecretString;
    use uuid::Uuid;

    #[test]
    fn jwt_round_trip_recovers_user_id() {
        let secret = SecretString::from("over-the-garden-wall".to_string());
        let user_id = Uuid::new_v4();
        let token = generate_jwt_token_for_user(user_id, 1, &secret).unwrap();
        let decoded = decode_token(token, &secret).unwrap();
        assert_eq!(decoded, user_id);
    }

    #[test]
    fn jwt_with_wrong_secret_is_rejected() {
        let secret = SecretString::from("correct-secret".to_string());
        let token = generate_jwt_token_for_user(Uuid::new_v4(), 1, &secret).unwrap();
        let other = SecretString::from("wrong-secret".to_string());
        assert!(matches!(
            decode_token(token, &other),
            Err(CustomJWTTokenError::Invalid(_))
        ));
    }
}
