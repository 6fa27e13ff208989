use async_trait::async_trait;

use super::domain::{AdminAccount, Credentials};
use super::errors::AuthError;

/// Persistence for admin accounts.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<(AdminAccount, Credentials)>, AuthError>;
    async fn create_admin(&self, username: &str, credentials: Credentials) -> Result<AdminAccount, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAdminRepository {
        admins: Mutex<HashMap<String, (AdminAccount, Credentials)>>, // key: username
    }

    fn poisoned<T>(_: T) -> AuthError { AuthError::Repository("mock lock poisoned".into()) }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<(AdminAccount, Credentials)>, AuthError> {
            let admins = self.admins.lock().map_err(poisoned)?;
            Ok(admins.get(username).cloned())
        }

        async fn create_admin(&self, username: &str, credentials: Credentials) -> Result<AdminAccount, AuthError> {
            let mut admins = self.admins.lock().map_err(poisoned)?;
            if admins.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let account = AdminAccount { id: admins.len() as i32 + 1, username: username.to_string() };
            admins.insert(username.to_string(), (account.clone(), credentials));
            Ok(account)
        }
    }
}
