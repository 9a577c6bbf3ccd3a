//! Off-chain model of a token presale.
//!
//! Shares its rules with the on-chain contract through `presale_core` and
//! adds what a contract gets from its host: payment custody, a clock,
//! serialized access for concurrent callers, and JSON deploy configs and
//! scenarios to drive it.

pub mod address;
pub mod bank;
pub mod clock;
pub mod config;
pub mod ledger;
pub mod scenario;
pub mod units;

pub use address::{Address, PaymentAsset, ZERO_ADDRESS};
pub use bank::{HolderBalances, InMemoryBank, PaymentProvider, TransferError, WhitelistOracle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, DeployConfig, Param};
pub use ledger::{CampaignState, LedgerError, PresaleLedger, SharedLedger};
pub use scenario::{run, Report, Scenario, ScenarioError, Step};
pub use units::{format_units, parse_units, UnitsError};
