//! Off-chain presale ledger.
//!
//! [`PresaleLedger`] owns the sale config and campaign state and applies one
//! operation at a time, taking the current time as an argument.
//! [`SharedLedger`] wraps it for concurrent callers: every call takes the
//! lock, reads the clock once, and runs to completion before the next.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use presale_core::{
    evaluate_purchase, phase_at, Phase, PresaleError, PurchaseContext, SaleConfig, UserInfo,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::address::{Address, PaymentAsset};
use crate::bank::{PaymentProvider, TransferError, WhitelistOracle};
use crate::clock::Clock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Presale(#[from] PresaleError),
    #[error("payment transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

impl LedgerError {
    /// Short outcome name: the presale error variant, or `TransferFailed`.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerError::Presale(err) => err.name(),
            LedgerError::Transfer(_) => "TransferFailed",
        }
    }
}

/// Mutable campaign data.
#[derive(Debug, Clone)]
pub struct CampaignState {
    owner: Address,
    total_raised: i128,
    users: HashMap<Address, UserInfo>,
}

impl CampaignState {
    pub fn new(owner: Address) -> Self {
        CampaignState {
            owner,
            total_raised: 0,
            users: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn total_raised(&self) -> i128 {
        self.total_raised
    }

    /// Zero record for buyers that never purchased.
    pub fn user(&self, buyer: &Address) -> UserInfo {
        self.users.get(buyer).copied().unwrap_or_default()
    }

    pub fn buyers(&self) -> usize {
        self.users.len()
    }
}

pub struct PresaleLedger<P, O> {
    config: SaleConfig,
    asset: PaymentAsset,
    state: CampaignState,
    payments: P,
    whitelist: O,
}

impl<P: PaymentProvider, O: WhitelistOracle> PresaleLedger<P, O> {
    pub fn new(
        config: SaleConfig,
        asset: PaymentAsset,
        owner: Address,
        payments: P,
        whitelist: O,
    ) -> Self {
        info!(
            %owner,
            %asset,
            hard_cap = config.hard_cap,
            start_time = config.start_time,
            "presale deployed"
        );
        PresaleLedger {
            config,
            asset,
            state: CampaignState::new(owner),
            payments,
            whitelist,
        }
    }

    /// Buy into the sale. All-or-nothing: on error nothing is recorded and
    /// no funds move.
    pub fn purchase(
        &mut self,
        buyer: &Address,
        amount: i128,
        payment: &PaymentAsset,
        now: u64,
    ) -> Result<UserInfo, LedgerError> {
        let result = self.apply_purchase(buyer, amount, payment, now);
        match &result {
            Ok(info) => info!(
                %buyer,
                amount,
                bought = info.bought,
                whitelist_bought = info.whitelist_bought,
                total_raised = self.state.total_raised,
                "purchase accepted"
            ),
            Err(err) => warn!(%buyer, amount, now, reason = %err, "purchase rejected"),
        }
        result
    }

    fn apply_purchase(
        &mut self,
        buyer: &Address,
        amount: i128,
        payment: &PaymentAsset,
        now: u64,
    ) -> Result<UserInfo, LedgerError> {
        if payment != &self.asset {
            return Err(PresaleError::InvalidPayment.into());
        }

        let ctx = PurchaseContext {
            now,
            total_raised: self.state.total_raised,
            user: self.state.user(buyer),
        };
        let whitelist = &self.whitelist;
        let purchase = evaluate_purchase(&self.config, ctx, amount, || {
            let balance = whitelist.balance_of(buyer);
            debug!(%buyer, balance, "whitelist balance read");
            balance
        })?;

        self.payments.transfer_in(&self.asset, buyer, amount)?;

        self.state.total_raised = purchase.total_raised;
        self.state.users.insert(buyer.clone(), purchase.user);
        Ok(purchase.user)
    }

    /// Pay the whole custody balance to the owner. Returns the amount paid,
    /// zero when there is nothing to withdraw.
    pub fn withdraw(&mut self, caller: &Address) -> Result<i128, LedgerError> {
        if caller != &self.state.owner {
            warn!(%caller, "withdraw rejected: not the owner");
            return Err(PresaleError::Unauthorized.into());
        }

        let amount = self.payments.custody(&self.asset);
        if amount > 0 {
            self.payments
                .transfer_out(&self.asset, &self.state.owner, amount)?;
        }
        info!(owner = %self.state.owner, amount, "funds withdrawn");
        Ok(amount)
    }

    /// Payment asset currently held.
    pub fn balance(&self) -> i128 {
        self.payments.custody(&self.asset)
    }

    pub fn phase(&self, now: u64) -> Phase {
        phase_at(&self.config, now)
    }

    pub fn soft_cap_reached(&self) -> bool {
        self.config.soft_cap_reached(self.state.total_raised)
    }

    pub fn state(&self) -> &CampaignState {
        &self.state
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }
}

/// A [`PresaleLedger`] shared between threads.
pub struct SharedLedger<P, O> {
    inner: Arc<Mutex<PresaleLedger<P, O>>>,
    clock: Arc<dyn Clock>,
}

impl<P, O> Clone for SharedLedger<P, O> {
    fn clone(&self) -> Self {
        SharedLedger {
            inner: Arc::clone(&self.inner),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P: PaymentProvider, O: WhitelistOracle> SharedLedger<P, O> {
    pub fn new(ledger: PresaleLedger<P, O>, clock: Arc<dyn Clock>) -> Self {
        SharedLedger {
            inner: Arc::new(Mutex::new(ledger)),
            clock,
        }
    }

    pub fn purchase(
        &self,
        buyer: &Address,
        amount: i128,
        payment: &PaymentAsset,
    ) -> Result<UserInfo, LedgerError> {
        let mut ledger = self.inner.lock();
        let now = self.clock.now();
        ledger.purchase(buyer, amount, payment, now)
    }

    pub fn withdraw(&self, caller: &Address) -> Result<i128, LedgerError> {
        self.inner.lock().withdraw(caller)
    }

    pub fn balance(&self) -> i128 {
        self.inner.lock().balance()
    }

    pub fn phase(&self) -> Phase {
        let ledger = self.inner.lock();
        ledger.phase(self.clock.now())
    }

    pub fn user_info(&self, user: &Address) -> UserInfo {
        self.inner.lock().state().user(user)
    }

    pub fn total_raised(&self) -> i128 {
        self.inner.lock().state().total_raised()
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&mut PresaleLedger<P, O>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
