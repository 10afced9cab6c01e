use crate::domain::EmailObject;
use config::{ConfigError, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub database: DatabaseConfig,
    pub payment: PaymentGatewayConfig,
    pub email: EmailClientConfig,
    pub secret: SecretConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub name: String,
    pub acquire_timeout: u64,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn without_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.name)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentGatewayConfig {
    pub base_url: String,
    pub key_id: String,
    pub key_secret: SecretString,
    pub timeout_secs: u64,
}

impl PaymentGatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: SecretString,
    pub sender_email: String,
}

impl EmailClientConfig {
    pub fn sender(&self) -> Result<EmailObject, String> {
        EmailObject::parse(self.sender_email.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretConfig {
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: SecretString,
    pub expiry_hours: i64,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    let builder = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("configuration.yaml"),
        ))
        .add_source(Environment::default().separator("__"))
        .build()?;
    builder.try_deserialize::<Settings>()
}
