use crate::errors::GenericError;
use crate::schemas::CurrencyType;
use actix_http::Payload;
use actix_web::web::Json;
use actix_web::{FromRequest, HttpRequest};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Settlement state as the gateway reports it, distinct from the stored
/// order status.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    NotPaid,
    Paid,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentOrderStatus {
    Created,
    Paid,
    Failed,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderCreateRequest {
    #[schema(value_type = f64)]
    pub amount: BigDecimal,
    #[schema(value_type = Option<String>)]
    pub campaign_id: Option<Uuid>,
    /// Client-generated key; retrying with the same key returns the order
    /// created by the first attempt instead of opening a second one.
    #[schema(value_type = String)]
    pub idempotency_key: Uuid,
}

impl PaymentOrderCreateRequest {
    fn validate_body(&self) -> Result<(), String> {
        if self.amount <= BigDecimal::from(0) {
            return Err("Amount must be positive".to_string());
        }
        Ok(())
    }
}

impl FromRequest for PaymentOrderCreateRequest {
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
pub struct PaymentConfirmRequest {
    pub order_id: String,
    /// Payment id the client claims; informational only, the server derives
    /// the real outcome from the gateway's payment list.
    pub payment_id: Option<String>,
}

impl FromRequest for PaymentConfirmRequest {
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
pub struct PaymentOrderData {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub idempotency_key: Uuid,
    #[schema(value_type = Option<String>)]
    pub campaign_id: Option<Uuid>,
    /// Major currency units; the gateway order carries `round(amount * 100)`.
    #[schema(value_type = f64)]
    pub amount: BigDecimal,
    pub currency: CurrencyType,
    pub gateway_order_id: String,
    pub receipt: String,
    pub status: PaymentOrderStatus,
    pub created_on: DateTime<Utc>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmData {
    pub order: PaymentOrderData,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    /// True only for the confirmation that recorded the settlement; replays
    /// and concurrent confirmations see false.
    pub newly_settled: bool,
}
