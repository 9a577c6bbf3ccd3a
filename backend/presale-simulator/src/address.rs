use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel address that selects the native currency as payment asset.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Account or token identifier, kept as the hex string it was given as.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Address(address.into())
    }

    pub fn zero() -> Self {
        Address(ZERO_ADDRESS.to_string())
    }

    /// `0x` followed only by zeros (any length).
    pub fn is_zero(&self) -> bool {
        let digits = self.0.strip_prefix("0x").unwrap_or(&self.0);
        !digits.is_empty() && digits.bytes().all(|b| b == b'0')
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Address::new(address)
    }
}

/// Asset a sale collects, resolved once from the deploy-time address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PaymentAsset {
    Native,
    Token(Address),
}

impl PaymentAsset {
    /// The zero address selects the native currency; anything else is a token.
    pub fn from_address(address: Address) -> Self {
        if address.is_zero() {
            PaymentAsset::Native
        } else {
            PaymentAsset::Token(address)
        }
    }
}

impl fmt::Display for PaymentAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentAsset::Native => f.write_str("native"),
            PaymentAsset::Token(address) => write!(f, "token {address}"),
        }
    }
}
