//! Payment and whitelist capabilities the ledger consumes, with in-memory
//! implementations for simulation.

use std::collections::HashMap;

use thiserror::Error;

use crate::address::{Address, PaymentAsset};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("{holder} holds {available} of {asset}, needs {required}")]
    InsufficientFunds {
        asset: PaymentAsset,
        holder: Address,
        available: i128,
        required: i128,
    },
    #[error("custody holds {available} of {asset}, needs {required}")]
    InsufficientCustody {
        asset: PaymentAsset,
        available: i128,
        required: i128,
    },
}

/// Moves the payment asset between buyers, the sale's custody and the owner.
pub trait PaymentProvider {
    /// Pull `amount` from `from` into custody.
    fn transfer_in(
        &mut self,
        asset: &PaymentAsset,
        from: &Address,
        amount: i128,
    ) -> Result<(), TransferError>;

    /// Pay `amount` out of custody to `to`.
    fn transfer_out(
        &mut self,
        asset: &PaymentAsset,
        to: &Address,
        amount: i128,
    ) -> Result<(), TransferError>;

    /// Amount of `asset` currently held in custody.
    fn custody(&self, asset: &PaymentAsset) -> i128;
}

/// Read-only balance of the whitelist token.
pub trait WhitelistOracle {
    fn balance_of(&self, holder: &Address) -> i128;
}

/// Account balances and sale custody for any number of assets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    balances: HashMap<(PaymentAsset, Address), i128>,
    custody: HashMap<PaymentAsset, i128>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `holder` out of thin air.
    pub fn mint(&mut self, asset: &PaymentAsset, holder: &Address, amount: i128) {
        *self
            .balances
            .entry((asset.clone(), holder.clone()))
            .or_default() += amount;
    }

    pub fn balance_of(&self, asset: &PaymentAsset, holder: &Address) -> i128 {
        self.balances
            .get(&(asset.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl PaymentProvider for InMemoryBank {
    fn transfer_in(
        &mut self,
        asset: &PaymentAsset,
        from: &Address,
        amount: i128,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                asset: asset.clone(),
                holder: from.clone(),
                available,
                required: amount,
            });
        }
        self.balances
            .insert((asset.clone(), from.clone()), available - amount);
        *self.custody.entry(asset.clone()).or_default() += amount;
        Ok(())
    }

    fn transfer_out(
        &mut self,
        asset: &PaymentAsset,
        to: &Address,
        amount: i128,
    ) -> Result<(), TransferError> {
        let available = self.custody(asset);
        if available < amount {
            return Err(TransferError::InsufficientCustody {
                asset: asset.clone(),
                available,
                required: amount,
            });
        }
        self.custody.insert(asset.clone(), available - amount);
        self.mint(asset, to, amount);
        Ok(())
    }

    fn custody(&self, asset: &PaymentAsset) -> i128 {
        self.custody.get(asset).copied().unwrap_or(0)
    }
}

/// Fixed whitelist-token holdings. Empty when the sale has no whitelist token.
#[derive(Debug, Clone, Default)]
pub struct HolderBalances(HashMap<Address, i128>);

impl HolderBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, holder: Address, amount: i128) {
        self.0.insert(holder, amount);
    }
}

impl WhitelistOracle for HolderBalances {
    fn balance_of(&self, holder: &Address) -> i128 {
        self.0.get(holder).copied().unwrap_or(0)
    }
}
