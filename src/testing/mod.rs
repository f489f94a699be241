use std::sync::Arc;

use crate::config::{AppConfig, Environment};
use crate::database::MemoryStore;
use crate::state::AppState;

pub const TEST_SECRET: &str = "unit-test-secret";

/// Development config with the cheapest bcrypt cost.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::new(Environment::Development, TEST_SECRET);
    config.security.bcrypt_cost = 4;
    config
}

/// Application state over a fresh in-memory store
pub fn test_state() -> AppState {
    AppState::new(test_config(), Arc::new(MemoryStore::new()))
}
