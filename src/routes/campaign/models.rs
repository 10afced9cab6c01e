use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{CampaignData, CampaignDonationData, CampaignStatus};

#[derive(Debug, FromRow)]
pub struct CampaignModel {
    pub id: Uuid,
    pub ngo_id: Uuid,
    pub name: String,
    pub description: String,
    pub goal_amount: BigDecimal,
    pub collected_amount: BigDecimal,
    pub status: CampaignStatus,
    pub created_on: DateTime<Utc>,
}

impl CampaignModel {
    pub fn into_schema(self) -> CampaignData {
        CampaignData {
            id: self.id,
            ngo_id: self.ngo_id,
            name: self.name,
            description: self.description,
            goal_amount: self.goal_amount,
            collected_amount: self.collected_amount,
            status: self.status,
            created_on: self.created_on,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CampaignDonationModel {
    pub id: Uuid,
    pub order_id: String,
    pub donor_id: Uuid,
    pub donor_display_name: String,
    pub amount: BigDecimal,
    pub created_on: DateTime<Utc>,
}

impl CampaignDonationModel {
    pub fn into_schema(self) -> CampaignDonationData {
        CampaignDonationData {
            id: self.id,
            order_id: self.order_id,
            donor_id: self.donor_id,
            donor_display_name: self.donor_display_name,
            amount: self.amount,
            created_on: self.created_on,
        }
    }
}
