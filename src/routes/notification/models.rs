use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::NotificationData;

#[derive(Debug, FromRow)]
pub struct NotificationModel {
    pub id: Uuid,
    pub message: String,
    pub seen: bool,
    pub created_on: DateTime<Utc>,
}

impl NotificationModel {
    pub fn into_schema(self) -> NotificationData {
        NotificationData {
            id: self.id,
            message: self.message,
            seen: self.seen,
            created_on: self.created_on,
        }
    }
}
