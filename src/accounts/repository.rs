use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{normalize_email, AccountModel};
use crate::shared::AppError;

/// Trait for account repository operations
#[async_trait]
pub trait AccountRepository {
    async fn create_account(&self, account: &AccountModel) -> Result<(), AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountModel>, AppError>;
}

/// In-memory implementation of AccountRepository
///
/// Accounts live for the lifetime of the process. Seed them at startup.
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, AccountModel>>,
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a repository with pre-populated accounts
    pub fn with_accounts(accounts: Vec<AccountModel>) -> Self {
        let account_map = accounts
            .into_iter()
            .map(|account| (account.email.clone(), account))
            .collect();

        Self {
            accounts: Mutex::new(account_map),
        }
    }

    #[cfg(test)]
    pub(crate) fn account_count(&self) -> usize {
        self.lock().map(|accounts| accounts.len()).unwrap_or(0)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, AccountModel>>, AppError> {
        self.accounts.lock().map_err(|_| {
            warn!("Account repository lock poisoned");
            AppError::Internal
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    #[instrument(skip(self, account))]
    async fn create_account(&self, account: &AccountModel) -> Result<(), AppError> {
        debug!(email = %account.email, role = %account.role, "Creating account in memory");

        let mut accounts = self.lock()?;
        if accounts.contains_key(&account.email) {
            warn!(email = %account.email, "Account already exists in memory");
            return Err(AppError::Conflict("Account already exists".to_string()));
        }
        accounts.insert(account.email.clone(), account.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountModel>, AppError> {
        let accounts = self.lock()?;
        let account = accounts.get(&normalize_email(email)).cloned();

        match &account {
            Some(a) => debug!(email = %a.email, role = %a.role, "Account found in memory"),
            None => debug!(email = %email, "Account not found in memory"),
        }

        Ok(account)
    }
}
