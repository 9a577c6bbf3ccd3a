//! Deploy configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "owner": "0x7F94465c4f87a84B2Fb52eb16c435cb37296f5bc",
//!   "whitelist_token": "0x7606046228DC445495709fF7DA470a36BB2Bd0ee",
//!   "payment_token": "0x0000000000000000000000000000000000000000",
//!   "params": ["0.3", "5", "0", "200", "1500", 0, "0", 12, 1662645600]
//! }
//! ```
//!
//! Amount params (min buy, max buy, soft cap, hard cap, tokens to sell) are
//! decimal quantities scaled by `decimals`; the whitelist threshold is scaled
//! by `whitelist_decimals`, which defaults to `decimals`. Durations and the
//! start time are plain integers.

use std::fs;
use std::path::{Path, PathBuf};

use presale_core::{SaleConfig, PARAM_COUNT, PARAM_NAMES};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{Address, PaymentAsset};
use crate::units::{parse_units, UnitsError};

const DEFAULT_DECIMALS: u32 = 18;

/// Positions in the param list holding durations or timestamps.
const TIME_PARAMS: [usize; 3] = [5, 7, 8];

/// Position of the whitelist threshold, counted in whitelist-token units.
const WHITELIST_THRESHOLD: usize = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deploy config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sale parameter `{name}`: {source}")]
    Amount {
        name: &'static str,
        #[source]
        source: UnitsError,
    },
    #[error("sale parameter `{name}` must be a whole number, got `{value}`")]
    NotInteger { name: &'static str, value: String },
    #[error(transparent)]
    Sale(#[from] presale_core::ConfigError),
    #[error("owner must not be the zero address")]
    ZeroOwner,
}

/// A positional sale parameter as written in JSON: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Integer(u64),
    Text(String),
}

impl Param {
    fn as_text(&self) -> String {
        match self {
            Param::Integer(value) => value.to_string(),
            Param::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    pub owner: Address,
    #[serde(default)]
    pub sale_token: Option<Address>,
    #[serde(default)]
    pub whitelist_token: Option<Address>,
    /// Zero address for the native currency.
    pub payment_token: Address,
    /// Decimals of the payment asset; amount params are scaled by them.
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// Decimals of the whitelist token, when they differ from `decimals`.
    /// Also scales the whitelist threshold.
    #[serde(default)]
    pub whitelist_decimals: Option<u32>,
    pub params: Vec<Param>,
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

impl DeployConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DeployConfig = serde_json::from_str(json)?;
        if config.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Scale and validate the positional params.
    pub fn sale_config(&self) -> Result<SaleConfig, ConfigError> {
        if self.params.len() != PARAM_COUNT {
            return Err(presale_core::ConfigError::ParamCount {
                expected: PARAM_COUNT,
                actual: self.params.len(),
            }
            .into());
        }

        let mut values = [0i128; PARAM_COUNT];
        for (index, param) in self.params.iter().enumerate() {
            let name = PARAM_NAMES[index];
            values[index] = if TIME_PARAMS.contains(&index) {
                match param {
                    Param::Integer(value) => i128::from(*value),
                    Param::Text(text) => {
                        text.trim()
                            .parse::<u64>()
                            .map(i128::from)
                            .map_err(|_| ConfigError::NotInteger {
                                name,
                                value: text.clone(),
                            })?
                    }
                }
            } else {
                let decimals = if index == WHITELIST_THRESHOLD {
                    self.whitelist_decimals()
                } else {
                    self.decimals
                };
                parse_units(&param.as_text(), decimals)
                    .map_err(|source| ConfigError::Amount { name, source })?
            };
        }

        Ok(SaleConfig::from_params(&values)?)
    }

    pub fn whitelist_decimals(&self) -> u32 {
        self.whitelist_decimals.unwrap_or(self.decimals)
    }

    pub fn payment_asset(&self) -> PaymentAsset {
        PaymentAsset::from_address(self.payment_token.clone())
    }
}
