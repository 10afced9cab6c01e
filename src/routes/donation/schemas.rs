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
#[sqlx(type_name = "donation_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DonationKind {
    Item,
    Money,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "donation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl DonationStatus {
    /// `Cancelled` and `Completed` are absorbing: nothing transitions out.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DonationStatus::Cancelled | DonationStatus::Completed)
    }

    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (DonationStatus::Pending, DonationStatus::Accepted)
                | (DonationStatus::Pending, DonationStatus::Cancelled)
                | (DonationStatus::Accepted, DonationStatus::Completed)
        )
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Accepted => "accepted",
            DonationStatus::Completed => "completed",
            DonationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DonationAction {
    Accept,
    Reject,
    Complete,
}

impl DonationAction {
    pub fn target_status(&self) -> DonationStatus {
        match self {
            DonationAction::Accept => DonationStatus::Accepted,
            DonationAction::Reject => DonationStatus::Cancelled,
            DonationAction::Complete => DonationStatus::Completed,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    #[schema(value_type = String)]
    pub ngo_id: Uuid,
    #[schema(value_type = Option<String>)]
    pub campaign_id: Option<Uuid>,
    pub kind: DonationKind,
    pub category: String,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<BigDecimal>,
    pub image_url: Option<String>,
}

impl CreateDonationRequest {
    fn validate_body(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("Category must not be empty".to_string());
        }
        match (&self.kind, &self.amount) {
            (DonationKind::Money, None) => Err("Money donations require an amount".to_string()),
            (_, Some(amount)) if amount <= &BigDecimal::from(0) => {
                Err("Amount must be positive".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl FromRequest for CreateDonationRequest {
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
pub struct DonationStatusUpdateRequest {
    #[schema(value_type = String)]
    pub donation_id: Uuid,
    pub action: DonationAction,
    /// Version the caller last read; stale versions are rejected instead of
    /// silently losing the concurrent update.
    pub version: i32,
}

impl FromRequest for DonationStatusUpdateRequest {
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

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationListFilter {
    pub status: Option<DonationStatus>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationData {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub donor_id: Uuid,
    #[schema(value_type = String)]
    pub ngo_id: Uuid,
    #[schema(value_type = Option<String>)]
    pub campaign_id: Option<Uuid>,
    pub kind: DonationKind,
    pub category: String,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<BigDecimal>,
    pub image_url: Option<String>,
    pub status: DonationStatus,
    pub version: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}
