use sea_orm::DatabaseConnection;

use crate::auth::domain::{AdminAccount, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AdminRepository;

pub struct SeaOrmAdminRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<(AdminAccount, Credentials)>, AuthError> {
        let res = models::admin::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|a| {
            (
                AdminAccount { id: a.id, username: a.username },
                Credentials { password_hash: a.password_hash, password_algorithm: a.password_algorithm },
            )
        }))
    }

    async fn create_admin(&self, username: &str, credentials: Credentials) -> Result<AdminAccount, AuthError> {
        let created = models::admin::create(&self.db, username, &credentials.password_hash, &credentials.password_algorithm)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(AdminAccount { id: created.id, username: created.username })
    }
}
