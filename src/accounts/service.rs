use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{models::AccountModel, repository::AccountRepository};
use crate::routing::Portal;
use crate::session::Role;
use crate::shared::AppError;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Credential checks behind the portal login endpoints
pub struct AccountService {
    repository: Arc<dyn AccountRepository + Send + Sync>,
    hash_cost: u32,
}

impl AccountService {
    /// `hash_cost` is the bcrypt cost accounts are hashed with
    pub fn new(repository: Arc<dyn AccountRepository + Send + Sync>, hash_cost: u32) -> Self {
        Self {
            repository,
            hash_cost,
        }
    }

    /// Checks email and password, and that the account's role belongs to the
    /// portal it is logging in through. All failures look the same to callers.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        portal: Portal,
        email: &str,
        password: &str,
    ) -> Result<AccountModel, AppError> {
        let Some(account) = self.repository.find_by_email(email).await? else {
            warn!(email = %email, "Login attempt for unknown account");
            // Same bcrypt work as checking a real account's password
            bcrypt::hash(password, self.hash_cost).map_err(|e| AppError::Hashing(e.to_string()))?;
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !account.verify_password(password)? {
            warn!(email = %account.email, "Login attempt with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if Portal::for_role(account.role) != portal {
            warn!(
                email = %account.email,
                role = %account.role,
                portal = %portal,
                "Login attempt through another role's portal"
            );
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!(email = %account.email, role = %account.role, "Account authenticated");
        Ok(account)
    }

    /// Creates the bootstrap super admin unless the email is already taken
    #[instrument(skip(self, password))]
    pub async fn seed_super_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.repository.find_by_email(email).await?.is_some() {
            info!(email = %email, "Seed admin already present");
            return Ok(());
        }

        let account = AccountModel::new(
            email,
            "Super Admin",
            password,
            Role::SuperAdmin,
            self.hash_cost,
        )?;
        self.repository.create_account(&account).await?;

        info!(email = %account.email, "Seeded super admin account");
        Ok(())
    }
}
