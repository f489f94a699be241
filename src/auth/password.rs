use thiserror::Error;

/// bcrypt only reads this many bytes of input; anything longer would be
/// silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    TooLong,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted bcrypt hashing with a fixed cost.
///
/// Both operations run on the blocking pool since bcrypt is deliberately slow.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }
        let password = password.to_owned();
        let cost = self.cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(digest)
    }

    /// Returns `false` for a wrong password, an over-long password and a
    /// malformed digest.
    pub async fn verify(&self, password: &str, digest: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        let password = password.to_owned();
        let digest = digest.to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }
}
