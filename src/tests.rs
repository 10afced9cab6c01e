#[cfg(test)]
pub mod tests {
    use crate::routes::user::schemas::{UserAccount, UserType};
    use crate::schemas::Status;
    use uuid::Uuid;

    pub fn get_dummy_user_account(role: UserType) -> UserAccount {
        let suffix = Uuid::new_v4().simple().to_string();
        UserAccount {
            id: Uuid::new_v4(),
            username: format!("user_{}", &suffix[..8]),
            email: format!("user_{}@example.org", &suffix[..8]),
            display_name: "Asha Worker".to_owned(),
            role,
            is_active: Status::Active,
            is_deleted: false,
        }
    }
}
