use crate::errors::GenericError;
use actix_http::Payload;
use actix_web::web::Json;
use actix_web::{FromRequest, HttpRequest};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Closed,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub goal_amount: BigDecimal,
}

impl CreateCampaignRequest {
    fn validate_body(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".to_string());
        }
        if self.goal_amount <= BigDecimal::from(0) {
            return Err("Goal amount must be positive".to_string());
        }
        Ok(())
    }
}

impl FromRequest for CreateCampaignRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);

        Box::pin(async move {
            match fut.await {
                Ok(json) => {
                    let body = json.into_inner();
                    body.validate_body().map_err(GenericError::ValidationError)?;
                    Ok(body)
                }
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCloseRequest {
    #[schema(value_type = String)]
    pub campaign_id: Uuid,
}

impl FromRequest for CampaignCloseRequest {
    type Error = GenericError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Json::<Self>::from_request(req, payload);

        Box::pin(async move {
            match fut.await {
                Ok(json) => Ok(json.into_inner()),
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignData {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub ngo_id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub goal_amount: BigDecimal,
    /// Sum of settled payments against this campaign.
    #[schema(value_type = f64)]
    pub collected_amount: BigDecimal,
    pub status: CampaignStatus,
    pub created_on: DateTime<Utc>,
}

/// One settled payment in a campaign's donation feed; the same rows the
/// websocket notification tells clients to re-fetch.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDonationData {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub order_id: String,
    #[schema(value_type = String)]
    pub donor_id: Uuid,
    pub donor_display_name: String,
    #[schema(value_type = f64)]
    pub amount: BigDecimal,
    pub created_on: DateTime<Utc>,
}
