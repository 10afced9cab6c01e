use sqlx::PgPool;
use uuid::Uuid;

use super::errors::NgoProfileError;
use super::models::NgoModel;
use super::schemas::{CreateNgoProfileRequest, NgoData};

#[tracing::instrument(name = "save ngo profile", skip(pool))]
pub async fn save_ngo_profile(
    pool: &PgPool,
    owner_id: Uuid,
    profile: &CreateNgoProfileRequest,
) -> Result<Uuid, NgoProfileError> {
    let ngo_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO ngo (owner_id, display_name, registration_no)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(owner_id)
    .bind(&profile.display_name)
    .bind(&profile.registration_no)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        let constraint = match &e {
            sqlx::Error::Database(db) => db.constraint().map(|s| s.to_string()),
            _ => None,
        };
        if constraint.as_deref() == Some("ngo_owner_id_key") {
            NgoProfileError::DuplicateProfile(anyhow::Error::new(e))
        } else {
            tracing::error!("Failed to execute query: {:?}", e);
            NgoProfileError::DatabaseError(
                "Failed to save NGO profile".to_string(),
                anyhow::Error::new(e),
            )
        }
    })?;
    Ok(ngo_id)
}

#[tracing::instrument(name = "fetch verified ngos", skip(pool))]
pub async fn fetch_verified_ngos(pool: &PgPool) -> Result<Vec<NgoData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, NgoModel>(
        r#"
        SELECT id, owner_id, display_name, registration_no, verified, created_on
        FROM ngo WHERE verified = TRUE
        ORDER BY display_name
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching NGOs")
    })?;
    Ok(rows.into_iter().map(NgoModel::into_schema).collect())
}

#[tracing::instrument(name = "fetch ngo by owner", skip(pool))]
pub async fn get_ngo_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Option<NgoData>, anyhow::Error> {
    let row = sqlx::query_as::<_, NgoModel>(
        r#"
        SELECT id, owner_id, display_name, registration_no, verified, created_on
        FROM ngo WHERE owner_id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching NGO profile")
    })?;
    Ok(row.map(NgoModel::into_schema))
}

#[tracing::instrument(name = "fetch ngo by id", skip(pool))]
pub async fn get_ngo_by_id(pool: &PgPool, ngo_id: Uuid) -> Result<Option<NgoData>, anyhow::Error> {
    let row = sqlx::query_as::<_, NgoModel>(
        r#"
        SELECT id, owner_id, display_name, registration_no, verified, created_on
        FROM ngo WHERE id = $1
        "#,
    )
    .bind(ngo_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching NGO")
    })?;
    Ok(row.map(NgoModel::into_schema))
}
