#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use validator::Validate;

    use crate::configuration::JwtConfig;
    use crate::routes::user::schemas::{AuthenticateRequest, CreateUserAccount, UserType};
    use crate::routes::user::utils::get_auth_data;
    use crate::tests::tests::get_dummy_user_account;
    use crate::utils::decode_token;

    #[test]
    fn registration_request_with_invalid_email_is_rejected() {
        let body = CreateUserAccount {
            username: "asha".to_string(),
            email: "not-an-email".to_string(),
            display_name: "Asha".to_string(),
            password: SecretString::from("hunter2hunter2".to_string()),
            role: UserType::Donor,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn registration_request_with_short_username_is_rejected() {
        let body = CreateUserAccount {
            username: "ab".to_string(),
            email: "asha@example.org".to_string(),
            display_name: "Asha".to_string(),
            password: SecretString::from("hunter2hunter2".to_string()),
            role: UserType::Ngo,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn login_request_validates_email() {
        let body = AuthenticateRequest {
            email: "asha@example.org".to_string(),
            password: SecretString::from("hunter2hunter2".to_string()),
        };
        assert!(body.validate().is_ok());
    }

    #[test]
    fn auth_data_token_resolves_back_to_the_user() {
        let jwt = JwtConfig {
            secret: SecretString::from("a-secret-for-tests".to_string()),
            expiry_hours: 2,
        };
        let user = get_dummy_user_account(UserType::Donor);
        let user_id = user.id;
        let auth_data = get_auth_data(user, &jwt).unwrap();
        assert_eq!(decode_token(auth_data.token, &jwt.secret).unwrap(), user_id);
    }
}
