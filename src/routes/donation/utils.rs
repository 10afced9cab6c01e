use sqlx::PgPool;
use uuid::Uuid;

use super::errors::DonationError;
use super::models::DonationModel;
use super::schemas::{
    CreateDonationRequest, DonationData, DonationStatus, DonationStatusUpdateRequest,
};
use crate::routes::ngo::utils::get_ngo_by_id;

const DONATION_COLUMNS: &str = "id, donor_id, ngo_id, campaign_id, kind, category, amount, \
     image_url, status, version, created_on, updated_on";

#[tracing::instrument(name = "save donation", skip(pool))]
pub async fn save_donation(
    pool: &PgPool,
    donor_id: Uuid,
    request: &CreateDonationRequest,
) -> Result<DonationData, DonationError> {
    let ngo = get_ngo_by_id(pool, request.ngo_id)
        .await?
        .ok_or_else(|| DonationError::ValidationError("Unknown NGO".to_string()))?;
    if let Some(campaign_id) = request.campaign_id {
        let campaign_ngo_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT ngo_id FROM campaign WHERE id = $1 AND status = 'active'",
        )
        .bind(campaign_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            DonationError::DatabaseError(
                "Failed to verify campaign".to_string(),
                anyhow::Error::new(e),
            )
        })?
        .ok_or_else(|| {
            DonationError::ValidationError("Campaign not found or not active".to_string())
        })?;
        if campaign_ngo_id != ngo.id {
            return Err(DonationError::ValidationError(
                "Campaign does not belong to the given NGO".to_string(),
            ));
        }
    }
    let row = sqlx::query_as::<_, DonationModel>(&format!(
        r#"
        INSERT INTO donation (donor_id, ngo_id, campaign_id, kind, category, amount, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        DONATION_COLUMNS
    ))
    .bind(donor_id)
    .bind(request.ngo_id)
    .bind(request.campaign_id)
    .bind(request.kind)
    .bind(&request.category)
    .bind(&request.amount)
    .bind(&request.image_url)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        DonationError::DatabaseError("Failed to save donation".to_string(), anyhow::Error::new(e))
    })?;
    Ok(row.into_schema())
}

#[tracing::instrument(name = "fetch donation", skip(pool))]
pub async fn get_donation(
    pool: &PgPool,
    donation_id: Uuid,
) -> Result<Option<DonationData>, anyhow::Error> {
    let row = sqlx::query_as::<_, DonationModel>(&format!(
        "SELECT {} FROM donation WHERE id = $1",
        DONATION_COLUMNS
    ))
    .bind(donation_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching donation")
    })?;
    Ok(row.map(DonationModel::into_schema))
}

#[tracing::instrument(name = "fetch donations for donor", skip(pool))]
pub async fn fetch_donations_for_donor(
    pool: &PgPool,
    donor_id: Uuid,
    status: Option<DonationStatus>,
) -> Result<Vec<DonationData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, DonationModel>(&format!(
        r#"
        SELECT {} FROM donation
        WHERE donor_id = $1 AND ($2::donation_status IS NULL OR status = $2)
        ORDER BY created_on DESC
        "#,
        DONATION_COLUMNS
    ))
    .bind(donor_id)
    .bind(status)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching donations")
    })?;
    Ok(rows.into_iter().map(DonationModel::into_schema).collect())
}

#[tracing::instrument(name = "fetch donations for ngo", skip(pool))]
pub async fn fetch_donations_for_ngo(
    pool: &PgPool,
    ngo_id: Uuid,
    status: Option<DonationStatus>,
) -> Result<Vec<DonationData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, DonationModel>(&format!(
        r#"
        SELECT {} FROM donation
        WHERE ngo_id = $1 AND ($2::donation_status IS NULL OR status = $2)
        ORDER BY created_on DESC
        "#,
        DONATION_COLUMNS
    ))
    .bind(ngo_id)
    .bind(status)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching donations")
    })?;
    Ok(rows.into_iter().map(DonationModel::into_schema).collect())
}

/// Applies a status action with optimistic locking. The UPDATE only lands when
/// both the version and the status still match what the caller saw, so two NGOs
/// racing on the same donation cannot both win.
#[tracing::instrument(name = "transition donation status", skip(pool))]
pub async fn transition_donation_status(
    pool: &PgPool,
    ngo_id: Uuid,
    request: &DonationStatusUpdateRequest,
) -> Result<DonationData, DonationError> {
    let current = get_donation(pool, request.donation_id)
        .await?
        .ok_or(DonationError::NotFound)?;
    if current.ngo_id != ngo_id {
        return Err(DonationError::NotOwner);
    }
    if current.status.is_terminal() {
        return Err(DonationError::TerminalState(current.status.to_string()));
    }
    let target = request.action.target_status();
    if !current.status.can_transition_to(target) {
        return Err(DonationError::InvalidTransition(format!(
            "Cannot move a {} donation to {}",
            current.status, target
        )));
    }
    let row = sqlx::query_as::<_, DonationModel>(&format!(
        r#"
        UPDATE donation
        SET status = $1, version = version + 1, updated_on = now()
        WHERE id = $2 AND version = $3 AND status = $4
        RETURNING {}
        "#,
        DONATION_COLUMNS
    ))
    .bind(target)
    .bind(request.donation_id)
    .bind(request.version)
    .bind(current.status)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        DonationError::DatabaseError(
            "Failed to update donation status".to_string(),
            anyhow::Error::new(e),
        )
    })?;
    row.map(DonationModel::into_schema)
        .ok_or(DonationError::ConcurrentUpdate)
}
