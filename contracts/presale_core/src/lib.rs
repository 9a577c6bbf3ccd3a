#![cfg_attr(not(test), no_std)]

//! Sale rules for a timed token presale: phase derivation, whitelist gating
//! and cap accounting. Nothing here touches storage or moves funds; callers
//! own the campaign state and apply the returned [`Purchase`].

mod config;
mod error;
mod phase;
mod purchase;

pub use config::{SaleConfig, PARAM_COUNT, PARAM_NAMES, SECONDS_PER_HOUR};
pub use error::{ConfigError, PresaleError};
pub use phase::{phase_at, Phase};
pub use purchase::{evaluate_purchase, Purchase, PurchaseContext, UserInfo};
