use sqlx::PgPool;
use uuid::Uuid;

use super::errors::CampaignError;
use super::models::{CampaignDonationModel, CampaignModel};
use super::schemas::{CampaignData, CampaignDonationData, CreateCampaignRequest};

const CAMPAIGN_SELECT: &str = r#"
    SELECT c.id, c.ngo_id, c.name, c.description, c.goal_amount,
           COALESCE((SELECT SUM(cd.amount) FROM campaign_donation cd
                     WHERE cd.campaign_id = c.id), 0) AS collected_amount,
           c.status, c.created_on
    FROM campaign c
"#;

#[tracing::instrument(name = "save campaign", skip(pool))]
pub async fn save_campaign(
    pool: &PgPool,
    ngo_id: Uuid,
    created_by: Uuid,
    request: &CreateCampaignRequest,
) -> Result<CampaignData, CampaignError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO campaign (ngo_id, name, description, goal_amount, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(ngo_id)
    .bind(&request.name)
    .bind(request.description.as_deref().unwrap_or(""))
    .bind(&request.goal_amount)
    .bind(created_by)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        CampaignError::DatabaseError("Failed to save campaign".to_string(), anyhow::Error::new(e))
    })?;
    get_campaign_by_id(pool, id)
        .await?
        .ok_or(CampaignError::NotFound)
}

#[tracing::instrument(name = "fetch campaign", skip(pool))]
pub async fn get_campaign_by_id(
    pool: &PgPool,
    campaign_id: Uuid,
) -> Result<Option<CampaignData>, anyhow::Error> {
    let row = sqlx::query_as::<_, CampaignModel>(&format!("{} WHERE c.id = $1", CAMPAIGN_SELECT))
        .bind(campaign_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching campaign")
        })?;
    Ok(row.map(CampaignModel::into_schema))
}

#[tracing::instrument(name = "fetch active campaigns", skip(pool))]
pub async fn fetch_active_campaigns(
    pool: &PgPool,
    ngo_id: Option<Uuid>,
) -> Result<Vec<CampaignData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, CampaignModel>(&format!(
        r#"{}
        JOIN ngo n ON n.id = c.ngo_id
        WHERE c.status = 'active' AND n.verified = TRUE
          AND ($1::uuid IS NULL OR c.ngo_id = $1)
        ORDER BY c.created_on DESC
        "#,
        CAMPAIGN_SELECT
    ))
    .bind(ngo_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching campaigns")
    })?;
    Ok(rows.into_iter().map(CampaignModel::into_schema).collect())
}

#[tracing::instrument(name = "close campaign", skip(pool))]
pub async fn close_campaign(
    pool: &PgPool,
    ngo_id: Uuid,
    campaign_id: Uuid,
) -> Result<CampaignData, CampaignError> {
    let campaign = get_campaign_by_id(pool, campaign_id)
        .await?
        .ok_or(CampaignError::NotFound)?;
    if campaign.ngo_id != ngo_id {
        return Err(CampaignError::NotOwner);
    }
    sqlx::query("UPDATE campaign SET status = 'closed' WHERE id = $1")
        .bind(campaign_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            CampaignError::DatabaseError(
                "Failed to close campaign".to_string(),
                anyhow::Error::new(e),
            )
        })?;
    get_campaign_by_id(pool, campaign_id)
        .await?
        .ok_or(CampaignError::NotFound)
}

/// Feed of settled payments for a campaign, newest first, with the donor's
/// display name joined in.
#[tracing::instrument(name = "fetch campaign donations", skip(pool))]
pub async fn fetch_campaign_donations(
    pool: &PgPool,
    campaign_id: Uuid,
) -> Result<Vec<CampaignDonationData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, CampaignDonationModel>(
        r#"
        SELECT cd.id, cd.order_id, cd.donor_id, ua.display_name AS donor_display_name,
               cd.amount, cd.created_on
        FROM campaign_donation cd
        JOIN user_account ua ON ua.id = cd.donor_id
        WHERE cd.campaign_id = $1
        ORDER BY cd.created_on DESC
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e)
            .context("A database failure occurred while fetching campaign donations")
    })?;
    Ok(rows
        .into_iter()
        .map(CampaignDonationModel::into_schema)
        .collect())
}
