use serde::Serialize;
use std::sync::Arc;

use crate::api::{LoginInput, RegisterInput};
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::database::models::{NewUser, UserProfile};
use crate::database::{DatabaseError, Store};
use crate::error::{ApiError, FieldErrors};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Registration and credential checks
pub struct AuthService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<UserProfile, ApiError> {
        if self.store.find_user_by_email(&input.email).await?.is_some() {
            tracing::info!("Registration rejected: {} already registered", input.email);
            return Err(email_taken());
        }

        let password_hash = self.hasher.hash(&input.password).await?;

        // A concurrent registration can still win the race to the unique index.
        let user = self
            .store
            .insert_user(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::Conflict(_) => email_taken(),
                other => other.into(),
            })?;

        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(UserProfile::from(&user))
    }

    pub async fn login(&self, input: LoginInput) -> Result<LoginResponse, ApiError> {
        let Some(user) = self.store.find_user_by_email(&input.email).await? else {
            tracing::warn!("Login failed: unknown email {}", input.email);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(&input.password, &user.password_hash).await {
            tracing::warn!("Login failed: wrong password for user {}", user.id);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        tracing::info!("User {} logged in", user.id);

        Ok(LoginResponse {
            message: "Login successful",
            token,
            expires_in: self.tokens.lifetime().num_seconds(),
            user: UserProfile::from(&user),
        })
    }
}

fn email_taken() -> ApiError {
    let mut fields = FieldErrors::new();
    fields.insert("email".to_string(), EMAIL_TAKEN.to_string());
    ApiError::validation_error(EMAIL_TAKEN, Some(fields))
}
