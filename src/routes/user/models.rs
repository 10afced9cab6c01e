use crate::schemas::Status;
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{UserAccount, UserType};

#[derive(Debug, FromRow)]
pub struct UserAccountModel {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: UserType,
    pub is_active: Status,
    pub is_deleted: bool,
}

impl UserAccountModel {
    pub fn into_schema(self) -> UserAccount {
        UserAccount {
            id: self.id,
            username: self.username,
            email: self.email,
            display_name: self.display_name,
            role: self.role,
            is_active: self.is_active,
            is_deleted: self.is_deleted,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct StoredCredentialsModel {
    pub id: Uuid,
    pub password_hash: String,
}
