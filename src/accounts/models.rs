use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::Role;
use crate::shared::AppError;

/// Portal user able to log in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: Uuid,
    pub email: String, // Stored lowercase, the login key
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl AccountModel {
    /// Creates an account, hashing the password with the given bcrypt cost
    pub fn new(
        email: &str,
        name: &str,
        password: &str,
        role: Role,
        hash_cost: u32,
    ) -> Result<Self, AppError> {
        let password_hash = bcrypt::hash(password, hash_cost)
            .map_err(|e| AppError::Hashing(e.to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            name: name.to_string(),
            password_hash,
            role,
            created_at: Utc::now(),
        })
    }

    pub fn verify_password(&self, password: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, &self.password_hash).map_err(|e| AppError::Hashing(e.to_string()))
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_hashes_password() {
        let account =
            AccountModel::new(" Dean@Campus.edu ", "Dean", "hunter2", Role::Admin, 4).unwrap();

        assert_eq!(account.email, "dean@campus.edu");
        assert_ne!(account.password_hash, "hunter2");
        assert!(account.verify_password("hunter2").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = AccountModel::new("a@b.c", "A", "secret", Role::Student, 4).unwrap();
        let json = serde_json::to_string(&account).unwrap();

        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"role\":\"STUDENT\""));
    }
}
