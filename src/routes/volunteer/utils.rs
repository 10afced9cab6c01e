use sqlx::PgPool;
use uuid::Uuid;

use super::models::LocationModel;
use super::schemas::{LocationData, LocationRecordRequest};

#[tracing::instrument(name = "record volunteer location", skip(pool))]
pub async fn record_location(
    pool: &PgPool,
    volunteer_id: Uuid,
    request: &LocationRecordRequest,
) -> Result<LocationData, anyhow::Error> {
    let row = sqlx::query_as::<_, LocationModel>(
        r#"
        INSERT INTO volunteer_location
            (volunteer_id, assignment_id, latitude, longitude, accuracy, recorded_on)
        VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()))
        RETURNING id, volunteer_id, assignment_id, latitude, longitude, accuracy, recorded_on
        "#,
    )
    .bind(volunteer_id)
    .bind(request.assignment_id)
    .bind(request.latitude)
    .bind(request.longitude)
    .bind(request.accuracy)
    .bind(request.recorded_on)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while recording location")
    })?;
    Ok(row.into_schema())
}

/// Latest ping per volunteer on an assignment; history stays in the table
/// but only the newest fix is served.
#[tracing::instrument(name = "fetch latest locations", skip(pool))]
pub async fn fetch_latest_locations(
    pool: &PgPool,
    assignment_id: Uuid,
) -> Result<Vec<LocationData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, LocationModel>(
        r#"
        SELECT DISTINCT ON (volunteer_id)
            id, volunteer_id, assignment_id, latitude, longitude, accuracy, recorded_on
        FROM volunteer_location
        WHERE assignment_id = $1
        ORDER BY volunteer_id, recorded_on DESC
        "#,
    )
    .bind(assignment_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching locations")
    })?;
    Ok(rows.into_iter().map(LocationModel::into_schema).collect())
}
