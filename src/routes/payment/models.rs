use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{PaymentOrderData, PaymentOrderStatus};
use crate::schemas::CurrencyType;

#[derive(Debug, FromRow)]
pub struct PaymentOrderModel {
    pub id: Uuid,
    pub idempotency_key: Uuid,
    pub campaign_id: Option<Uuid>,
    pub created_by: Uuid,
    pub amount: BigDecimal,
    pub gateway_order_id: String,
    pub receipt: String,
    pub status: PaymentOrderStatus,
    pub created_on: DateTime<Utc>,
}

impl PaymentOrderModel {
    pub fn into_schema(self) -> PaymentOrderData {
        PaymentOrderData {
            id: self.id,
            idempotency_key: self.idempotency_key,
            campaign_id: self.campaign_id,
            amount: self.amount,
            currency: CurrencyType::Inr,
            gateway_order_id: self.gateway_order_id,
            receipt: self.receipt,
            status: self.status,
            created_on: self.created_on,
        }
    }
}
