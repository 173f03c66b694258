use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher, SaltString,
    },
    Argon2, PasswordVerifier,
};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::auth::{self, Claims, JwtError};
use crate::database::manager::DatabaseError;
use crate::database::models::user::AppUser;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email address already used")]
    EmailTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        AccountError::Database(DatabaseError::Sqlx(err))
    }
}

/// Validated registration input; handlers own field-level validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: String,
}

/// A stored user together with a freshly issued token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user: AppUser,
    pub token: String,
    pub expires_in: u64,
}

/// User registration and credential checks against the users table, plus JWT
/// issuance for authenticated sessions.
pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new user (argon2-hashed password, "client" role) and issue a
    /// token for the fresh account.
    pub async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, AccountError> {
        if self.find_by_username(&registration.username).await?.is_some() {
            return Err(AccountError::UsernameTaken);
        }

        if self.find_by_email(&registration.email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = hash_password(&registration.password)?;

        let user = sqlx::query_as::<_, AppUser>(
            "INSERT INTO users (first_name, last_name, username, email, phone, address, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'client')
             RETURNING id, first_name, last_name, username, email, phone, address, password_hash, role, created_at",
        )
        .bind(&registration.first_name)
        .bind(&registration.last_name)
        .bind(&registration.username)
        .bind(&registration.email)
        .bind(&registration.phone)
        .bind(&registration.address)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        info!(username = %user.username, "registered new user");
        self.with_token(user)
    }

    /// Check credentials and issue a token for the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AccountError> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        info!(username = %user.username, "user logged in");
        self.with_token(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, AccountError> {
        let user = sqlx::query_as::<_, AppUser>(
            "SELECT id, first_name, last_name, username, email, phone, address, password_hash, role, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, AccountError> {
        let user = sqlx::query_as::<_, AppUser>(
            "SELECT id, first_name, last_name, username, email, phone, address, password_hash, role, created_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    fn with_token(&self, user: AppUser) -> Result<AuthenticatedUser, AccountError> {
        let claims = Claims::new(user.username.clone(), user.role.clone(), user.id);
        let token = auth::generate_jwt(claims)?;

        Ok(AuthenticatedUser {
            user,
            token,
            expires_in: auth::token_expiry_secs(),
        })
    }
}

fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<(), AccountError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|err| match err {
            PasswordHashError::Password => AccountError::InvalidCredentials,
            other => AccountError::PasswordHash(other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("hunter2-secret").unwrap();
        assert!(verify_password("hunter2-secret", &hash).is_ok());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("hunter2-secret").unwrap();
        let err = verify_password("wrong-password", &hash).unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }
}
