use thiserror::Error;

/// Reasons a purchase or withdrawal is rejected.
///
/// Every variant aborts the triggering call with no state change.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum PresaleError {
    #[error("payment asset does not match the sale's payment asset")]
    InvalidPayment,
    #[error("sale has not started yet")]
    NotStarted,
    #[error("buyer is not in the whitelist")]
    NotWhitelisted,
    #[error("sale is over")]
    SaleOver,
    #[error("amount or interval invalid")]
    InvalidAmount,
    #[error("user cap reached")]
    UserCapReached,
    #[error("hard cap reached")]
    CapReached,
    #[error("caller is not the owner")]
    Unauthorized,
}

impl PresaleError {
    /// Stable numeric code, shared with the on-chain error enum.
    pub const fn code(self) -> u32 {
        match self {
            PresaleError::InvalidPayment => 1,
            PresaleError::NotStarted => 2,
            PresaleError::NotWhitelisted => 3,
            PresaleError::SaleOver => 4,
            PresaleError::InvalidAmount => 5,
            PresaleError::UserCapReached => 6,
            PresaleError::CapReached => 7,
            PresaleError::Unauthorized => 8,
        }
    }

    /// Variant name, e.g. `"UserCapReached"`.
    pub const fn name(self) -> &'static str {
        match self {
            PresaleError::InvalidPayment => "InvalidPayment",
            PresaleError::NotStarted => "NotStarted",
            PresaleError::NotWhitelisted => "NotWhitelisted",
            PresaleError::SaleOver => "SaleOver",
            PresaleError::InvalidAmount => "InvalidAmount",
            PresaleError::UserCapReached => "UserCapReached",
            PresaleError::CapReached => "CapReached",
            PresaleError::Unauthorized => "Unauthorized",
        }
    }
}

/// Rejections raised while building a [`crate::SaleConfig`].
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    #[error("expected {expected} sale parameters, got {actual}")]
    ParamCount { expected: usize, actual: usize },
    #[error("sale parameter `{0}` must not be negative")]
    Negative(&'static str),
    #[error("sale parameter `{0}` is out of range")]
    OutOfRange(&'static str),
    #[error("min buy exceeds max buy")]
    MinAboveMax,
    #[error("soft cap exceeds hard cap")]
    SoftCapAboveHardCap,
    #[error("max buy exceeds hard cap")]
    MaxBuyAboveHardCap,
}
