use models::errors::ModelError;
use sea_orm::DatabaseConnection;

use crate::auth::domain::UserRecord;
use crate::auth::errors::AuthError;
use crate::auth::repository::CredentialRepository;

pub struct SeaOrmCredentialRepository {
    pub db: DatabaseConnection,
}

fn to_record(u: models::user::Model) -> UserRecord {
    UserRecord { id: u.id, username: u.username, password_hash: u.hashed_password }
}

#[async_trait::async_trait]
impl CredentialRepository for SeaOrmCredentialRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let found = models::user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(found.map(to_record))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<UserRecord, AuthError> {
        match models::user::create(&self.db, username, password_hash).await {
            Ok(created) => Ok(to_record(created)),
            Err(ModelError::Duplicate(_)) => Err(AuthError::DuplicateUsername),
            Err(ModelError::Validation(msg)) => Err(AuthError::Validation(msg)),
            Err(ModelError::Db(msg)) => Err(AuthError::Repository(msg)),
        }
    }
}
