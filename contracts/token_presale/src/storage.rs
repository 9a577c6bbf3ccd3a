// contracts/token_presale/src/storage.rs
//
// Storage helpers for TokenPresale.
//
//   - DataKey::Config       → PresaleConfig (instance, written once by `init`)
//   - DataKey::State        → CampaignState (instance, rewritten per purchase)
//   - DataKey::User(buyer)  → UserInfo      (persistent, created on first purchase)

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{
    types::{CampaignState, PresaleConfig, UserInfo},
    Error,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    State,
    User(Address),
}

// ─────────────────────────────────────────────────────────
// Deployment record
// ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &PresaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

/// Load the deployment record. Panics with `Error::NotInitialized` if missing.
pub fn load_config(env: &Env) -> PresaleConfig {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

// ─────────────────────────────────────────────────────────
// Campaign state
// ─────────────────────────────────────────────────────────

pub fn save_state(env: &Env, state: &CampaignState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn load_state(env: &Env) -> CampaignState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

// ─────────────────────────────────────────────────────────
// Per-buyer records
// ─────────────────────────────────────────────────────────

/// Returns the zero record for a buyer that never purchased.
pub fn load_user_info(env: &Env, buyer: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&DataKey::User(buyer.clone()))
        .unwrap_or_default()
}

pub fn save_user_info(env: &Env, buyer: &Address, info: &UserInfo) {
    env.storage()
        .persistent()
        .set(&DataKey::User(buyer.clone()), info);
}
