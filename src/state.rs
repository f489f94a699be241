use chrono::Duration;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::config::{AppConfig, MAX_JWT_EXPIRY_HOURS};
use crate::database::Store;
use crate::services::{AuthService, DashboardService, GoalService, TaskService};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenIssuer>,
    pub auth: Arc<AuthService>,
    pub tasks: Arc<TaskService>,
    pub goals: Arc<GoalService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let security = &config.security;
        // Clamped so a hand-built config cannot overflow the lifetime.
        let hours = security.jwt_expiry_hours.min(MAX_JWT_EXPIRY_HOURS) as i64;
        let lifetime = Duration::hours(hours);
        let tokens = Arc::new(TokenIssuer::new(&security.jwt_secret, lifetime));
        let hasher = PasswordHasher::new(security.bcrypt_cost);

        Self {
            auth: Arc::new(AuthService::new(store.clone(), hasher, tokens.clone())),
            tasks: Arc::new(TaskService::new(store.clone())),
            goals: Arc::new(GoalService::new(store.clone())),
            dashboard: Arc::new(DashboardService::new(store.clone())),
            tokens,
            store,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::testing::test_config;
    use uuid::Uuid;

    #[test]
    fn hand_built_lifetime_is_clamped() {
        let mut config = test_config();
        config.security.jwt_expiry_hours = 100_000_000_000;
        let state = AppState::new(config, Arc::new(MemoryStore::new()));

        assert_eq!(state.tokens.lifetime(), Duration::hours(MAX_JWT_EXPIRY_HOURS as i64));
        let token = state.tokens.issue(Uuid::new_v4(), "ada@example.com").unwrap();
        assert!(state.tokens.verify(&token).is_ok());
    }
}
