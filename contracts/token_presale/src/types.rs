// contracts/token_presale/src/types.rs
//
// On-chain records. The sale rules themselves live in `presale_core`; the
// `#[contracttype]` mirrors here only exist so the records can be stored and
// returned across the contract boundary.
//
// Immutable data (`PresaleConfig`) and mutable data (`CampaignState`) sit in
// separate instance entries so a purchase rewrites only the small state entry.

use soroban_sdk::{contracttype, Address};

/// Asset buyers pay with, fixed at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PaymentAsset {
    /// The network's native asset, addressed through its asset contract.
    Native,
    /// Any other token contract.
    Token(Address),
}

/// Sale parameters, in the same order as the positional `init` params.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub min_buy: i128,
    pub max_buy: i128,
    pub soft_cap: i128,
    pub hard_cap: i128,
    pub whitelist_threshold: i128,
    /// Hours.
    pub whitelist_duration: u64,
    pub tokens_to_sell: i128,
    /// Hours; zero keeps the public window open until the hard cap is hit.
    pub public_duration: u64,
    pub start_time: u64,
}

/// Everything fixed at deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleConfig {
    pub payment: PaymentAsset,
    /// Token contract funds are collected in (`payment` resolved at `init`).
    pub payment_token: Address,
    /// Token whose balance gates the whitelist window, if any.
    pub whitelist_token: Option<Address>,
    /// Token being sold. Informational.
    pub sale_token: Option<Address>,
    pub sale: SaleConfig,
}

/// Mutable campaign data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Sole address allowed to withdraw collected funds.
    pub owner: Address,
    /// Sum of all accepted purchases. Never exceeds a non-zero hard cap.
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub bought: i128,
    pub whitelist_bought: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    NotStarted,
    WhitelistOnly,
    Public,
    Ended,
}

impl From<&SaleConfig> for presale_core::SaleConfig {
    fn from(config: &SaleConfig) -> Self {
        presale_core::SaleConfig {
            min_buy: config.min_buy,
            max_buy: config.max_buy,
            soft_cap: config.soft_cap,
            hard_cap: config.hard_cap,
            whitelist_threshold: config.whitelist_threshold,
            whitelist_duration: config.whitelist_duration,
            tokens_to_sell: config.tokens_to_sell,
            public_duration: config.public_duration,
            start_time: config.start_time,
        }
    }
}

impl From<presale_core::SaleConfig> for SaleConfig {
    fn from(config: presale_core::SaleConfig) -> Self {
        SaleConfig {
            min_buy: config.min_buy,
            max_buy: config.max_buy,
            soft_cap: config.soft_cap,
            hard_cap: config.hard_cap,
            whitelist_threshold: config.whitelist_threshold,
            whitelist_duration: config.whitelist_duration,
            tokens_to_sell: config.tokens_to_sell,
            public_duration: config.public_duration,
            start_time: config.start_time,
        }
    }
}

impl From<UserInfo> for presale_core::UserInfo {
    fn from(info: UserInfo) -> Self {
        presale_core::UserInfo {
            bought: info.bought,
            whitelist_bought: info.whitelist_bought,
        }
    }
}

impl From<presale_core::UserInfo> for UserInfo {
    fn from(info: presale_core::UserInfo) -> Self {
        UserInfo {
            bought: info.bought,
            whitelist_bought: info.whitelist_bought,
        }
    }
}

impl From<presale_core::Phase> for Phase {
    fn from(phase: presale_core::Phase) -> Self {
        match phase {
            presale_core::Phase::NotStarted => Phase::NotStarted,
            presale_core::Phase::WhitelistOnly => Phase::WhitelistOnly,
            presale_core::Phase::Public => Phase::Public,
            presale_core::Phase::Ended => Phase::Ended,
        }
    }
}
