use crate::domain::user::User;
use crate::error::{AppError, Result};
use crate::storage::user_repo::UserRepository;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand::rngs::OsRng;
use std::sync::Arc;

/// The password hashing capability. Injected at construction so tests can
/// substitute a fake without touching shared state.
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted one-way hash of `password`.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if hashing fails.
    fn hash(&self, password: &str) -> Result<String>;

    /// Checks `password` against a stored hash.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if the stored hash cannot be parsed.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Argon2 at default cost. Comparison inside `verify_password` is
/// constant-time.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AppError::Internal)
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(password_hash).map_err(|_| AppError::Internal)?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }
}

#[derive(Clone)]
pub struct AccountService {
    repo: UserRepository,
    hasher: Arc<dyn PasswordHasher>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").field("repo", &self.repo).finish_non_exhaustive()
    }
}

impl AccountService {
    #[must_use]
    pub fn new(repo: UserRepository, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the username or password is too
    /// short after trimming, and `AppError::Conflict` if the username is
    /// already taken.
    #[tracing::instrument(skip(self, username, password), err(level = "warn"))]
    pub async fn register(&self, username: String, password: String) -> Result<User> {
        let username = username.trim().to_string();
        let password = password.trim().to_string();

        if username.len() < 3 {
            return Err(AppError::BadRequest("username must be at least 3 characters".to_string()));
        }
        if password.len() < 8 {
            return Err(AppError::BadRequest("password must be at least 8 characters".to_string()));
        }

        // Hashing is CPU-bound; keep it off the async executor threads.
        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| AppError::Internal)??;

        self.repo.create(&username, &password_hash).await
    }

    /// Checks a username/password pair and returns the matching user.
    ///
    /// An unknown username and a wrong password both come back as
    /// `AppError::AuthError`, so callers cannot probe which usernames exist.
    #[tracing::instrument(skip(self, username, password), err(level = "warn"))]
    pub async fn verify(&self, username: String, password: String) -> Result<User> {
        let Some(user) = self.repo.find_by_username(username.trim()).await? else {
            tracing::debug!("Login failed: user not found");
            return Err(AppError::AuthError);
        };

        let hasher = Arc::clone(&self.hasher);
        let password_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|_| AppError::Internal)??;

        if !is_valid {
            tracing::debug!("Login failed: invalid password");
            return Err(AppError::AuthError);
        }

        Ok(user)
    }
}
