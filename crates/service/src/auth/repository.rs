use async_trait::async_trait;

use super::domain::UserRecord;
use super::errors::AuthError;

/// Repository abstraction for credential persistence.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
    /// Must fail with `AuthError::DuplicateUsername` when the name is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<UserRecord, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCredentialRepository {
        users: Mutex<HashMap<String, UserRecord>>, // key: username
    }

    impl MockCredentialRepository {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, UserRecord>>, AuthError> {
            self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl CredentialRepository for MockCredentialRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
            Ok(self.lock()?.get(username).cloned())
        }

        async fn create_user(&self, username: &str, password_hash: &str) -> Result<UserRecord, AuthError> {
            let mut users = self.lock()?;
            if users.contains_key(username) {
                return Err(AuthError::DuplicateUsername);
            }
            let record = UserRecord {
                id: users.len() as i32 + 1,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            users.insert(username.to_string(), record.clone());
            Ok(record)
        }
    }
}
