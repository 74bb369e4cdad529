use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{LoginInput, RegisterInput, User};
use super::errors::AuthError;
use super::repository::CredentialRepository;

/// Credential Store: registration and password verification over a repository.
pub struct CredentialStore<R: CredentialRepository> {
    repo: Arc<R>,
}

impl<R: CredentialRepository> CredentialStore<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a new user, storing only an argon2 hash of the password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{CredentialStore, repository::mock::MockCredentialRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let store = CredentialStore::new(Arc::new(MockCredentialRepository::default()));
    /// let input = RegisterInput { username: "alice".into(), password: "wonderland".into() };
    /// let user = tokio_test::block_on(store.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        if input.username.trim().is_empty() {
            return Err(AuthError::Validation("username required".into()));
        }
        if input.password.is_empty() {
            return Err(AuthError::Validation("password required".into()));
        }
        if self.repo.find_by_username(&input.username).await?.is_some() {
            debug!("username already taken");
            return Err(AuthError::DuplicateUsername);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        // a concurrent insert still trips the unique index and maps to DuplicateUsername
        let record = self.repo.create_user(&input.username, &hash).await?;
        info!(user_id = record.id, username = %record.username, "user_registered");
        Ok(record.into())
    }

    /// Check a username/password pair. `None` when the user is unknown or the password does not match.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{CredentialStore, repository::mock::MockCredentialRepository};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use std::sync::Arc;
    /// let store = CredentialStore::new(Arc::new(MockCredentialRepository::default()));
    /// let _ = tokio_test::block_on(store.register(RegisterInput { username: "bob".into(), password: "hunter2".into() }));
    /// let ok = tokio_test::block_on(store.verify(LoginInput { username: "bob".into(), password: "hunter2".into() })).unwrap();
    /// assert!(ok.is_some());
    /// let bad = tokio_test::block_on(store.verify(LoginInput { username: "bob".into(), password: "hunter3".into() })).unwrap();
    /// assert!(bad.is_none());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn verify(&self, input: LoginInput) -> Result<Option<User>, AuthError> {
        let Some(record) = self.repo.find_by_username(&input.username).await? else {
            debug!("unknown username");
            return Ok(None);
        };

        let parsed = match PasswordHash::new(&record.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "stored hash is not a valid PHC string");
                return Ok(None);
            }
        };
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Ok(None);
        }
        Ok(Some(record.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockCredentialRepository;
    use crate::auth::repo::seaorm::SeaOrmCredentialRepository;
    use crate::test_support::get_db;

    fn register_input(username: &str, password: &str) -> RegisterInput {
        RegisterInput { username: username.into(), password: password.into() }
    }

    fn login_input(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn register_then_verify_returns_same_user() {
        let store = CredentialStore::new(Arc::new(MockCredentialRepository::default()));
        let user = store.register(register_input("carol", "s3cret")).await.unwrap();
        let verified = store.verify(login_input("carol", "s3cret")).await.unwrap();
        assert_eq!(verified, Some(user));
        assert!(store.verify(login_input("carol", "S3cret")).await.unwrap().is_none());
        assert!(store.verify(login_input("nobody", "s3cret")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_rejects_duplicates_and_blanks() {
        let store = CredentialStore::new(Arc::new(MockCredentialRepository::default()));
        store.register(register_input("dave", "pw")).await.unwrap();
        let err = store.register(register_input("dave", "other")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
        assert!(matches!(store.register(register_input("  ", "pw")).await, Err(AuthError::Validation(_))));
        assert!(matches!(store.register(register_input("erin", "")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn hash_never_equals_plaintext() {
        let repo = Arc::new(MockCredentialRepository::default());
        let store = CredentialStore::new(repo.clone());
        store.register(register_input("frank", "plaintext")).await.unwrap();
        let rec = repo.find_by_username("frank").await.unwrap().unwrap();
        assert_ne!(rec.password_hash, "plaintext");
        assert!(rec.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn seaorm_repository_roundtrip() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let store = CredentialStore::new(Arc::new(SeaOrmCredentialRepository { db }));
        let user = store.register(register_input("grace", "hopper")).await?;
        assert!(user.id > 0);
        let err = store.register(register_input("grace", "again")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
        assert_eq!(store.verify(login_input("grace", "hopper")).await?, Some(user));
        assert_eq!(store.verify(login_input("grace", "nope")).await?, None);
        Ok(())
    }
}
