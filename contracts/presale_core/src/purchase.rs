use crate::{phase_at, Phase, PresaleError, SaleConfig};

/// Per-buyer contribution record.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    /// Contributed during the public window.
    pub bought: i128,
    /// Contributed during the whitelist window.
    pub whitelist_bought: i128,
}

impl UserInfo {
    pub fn total(&self) -> i128 {
        self.bought + self.whitelist_bought
    }
}

/// Campaign snapshot a purchase is evaluated against.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PurchaseContext {
    /// Read once by the caller for the whole operation.
    pub now: u64,
    pub total_raised: i128,
    pub user: UserInfo,
}

/// Outcome of an accepted purchase, to be committed by the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Purchase {
    pub phase: Phase,
    pub amount: i128,
    pub user: UserInfo,
    pub total_raised: i128,
}

/// Check a purchase of `amount` against the sale rules and compute the
/// resulting records.
///
/// Payment-asset matching happens before this call; the remaining checks run
/// in order: phase, whitelist, amount bounds, user cap, hard cap.
/// `whitelist_balance` is only invoked inside the whitelist window.
pub fn evaluate_purchase<F>(
    config: &SaleConfig,
    ctx: PurchaseContext,
    amount: i128,
    whitelist_balance: F,
) -> Result<Purchase, PresaleError>
where
    F: FnOnce() -> i128,
{
    let phase = phase_at(config, ctx.now);
    match phase {
        Phase::NotStarted => return Err(PresaleError::NotStarted),
        Phase::WhitelistOnly => {
            if whitelist_balance() < config.whitelist_threshold {
                return Err(PresaleError::NotWhitelisted);
            }
        }
        Phase::Ended => return Err(PresaleError::SaleOver),
        Phase::Public => {}
    }

    if amount <= 0 || amount < config.min_buy {
        return Err(PresaleError::InvalidAmount);
    }
    if config.max_buy != 0 && amount > config.max_buy {
        return Err(PresaleError::InvalidAmount);
    }

    let user_total = ctx
        .user
        .total()
        .checked_add(amount)
        .ok_or(PresaleError::InvalidAmount)?;
    if config.max_buy != 0 && user_total > config.max_buy {
        return Err(PresaleError::UserCapReached);
    }

    let total_raised = ctx
        .total_raised
        .checked_add(amount)
        .ok_or(PresaleError::CapReached)?;
    if config.hard_cap != 0 && total_raised > config.hard_cap {
        return Err(PresaleError::CapReached);
    }

    let mut user = ctx.user;
    if phase == Phase::WhitelistOnly {
        user.whitelist_bought += amount;
    } else {
        user.bought += amount;
    }

    Ok(Purchase {
        phase,
        amount,
        user,
        total_raised,
    })
}
