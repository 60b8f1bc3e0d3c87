//! Credential verification and registration

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::Lazy;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, RegisterUser, User},
    repository::{UserStore, DUPLICATE_LOGIN},
};

const INVALID_CREDENTIALS: &str = "Invalid login or password";

/// Hash checked when the login is unknown, so a miss costs as much as a wrong password
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("coursify-dummy-password").ok());

/// Split a `Basic base64(login:password)` header value into its pair.
///
/// Returns `None` for any other scheme, a payload that is not base64 or not
/// UTF-8, or a decoded payload without a `:` separator.
pub fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let (scheme, payload) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = STANDARD.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (login, password) = decoded.split_once(':')?;
    if login.is_empty() {
        return None;
    }

    Some((login.to_string(), password.to_string()))
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Resolve an `Authorization` header value to the id of the user it names
    pub async fn verify(&self, authorization: Option<&str>) -> AppResult<i64> {
        let (login, password) = authorization
            .and_then(parse_basic_credentials)
            .ok_or_else(|| AppError::Authentication("Missing or malformed Basic credentials".to_string()))?;

        let Some(credentials) = self.users.find_credentials(&login).await? else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(hash, &password);
            }
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&credentials.password_hash, &password)? {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        Ok(credentials.user_id)
    }

    /// Register a new user; the password is stored as an Argon2 hash
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        input.validate()?;

        if self.users.login_exists(&input.login).await? {
            return Err(AppError::Conflict(DUPLICATE_LOGIN.to_string()));
        }

        let user = NewUser {
            login: input.login.clone(),
            name: input.display_name(),
            avatar: input.avatar,
            about: input.about,
            password_hash: hash_password(&input.password)?,
        };

        let id = self.users.create(&user).await?;
        tracing::info!("Registered user {} ({})", user.login, id);

        self.users
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
