use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// A validated email address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailObject(String);

impl EmailObject {
    pub fn parse(s: String) -> Result<EmailObject, String> {
        if s.validate_email() {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailObject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::EmailObject;

    #[test]
    fn valid_email_is_accepted() {
        assert!(EmailObject::parse("donor@example.org".to_string()).is_ok());
    }

    #[test]
    fn email_missing_at_symbol_is_rejected() {
        assert!(EmailObject::parse("donor.example.org".to_string()).is_err());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(EmailObject::parse("".to_string()).is_err());
    }
}
