use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::NgoData;

#[derive(Debug, FromRow)]
pub struct NgoModel {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub display_name: String,
    pub registration_no: String,
    pub verified: bool,
    pub created_on: DateTime<Utc>,
}

impl NgoModel {
    pub fn into_schema(self) -> NgoData {
        NgoData {
            id: self.id,
            owner_id: self.owner_id,
            display_name: self.display_name,
            registration_no: self.registration_no,
            verified: self.verified,
            created_on: self.created_on,
        }
    }
}
