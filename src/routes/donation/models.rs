use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{DonationData, DonationKind, DonationStatus};

#[derive(Debug, FromRow)]
pub struct DonationModel {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub ngo_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub kind: DonationKind,
    pub category: String,
    pub amount: Option<BigDecimal>,
    pub image_url: Option<String>,
    pub status: DonationStatus,
    pub version: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl DonationModel {
    pub fn into_schema(self) -> DonationData {
        DonationData {
            id: self.id,
            donor_id: self.donor_id,
            ngo_id: self.ngo_id,
            campaign_id: self.campaign_id,
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            image_url: self.image_url,
            status: self.status,
            version: self.version,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}
