#![no_std]

use presale_core::{evaluate_purchase, phase_at, PresaleError, PurchaseContext, PARAM_COUNT};
use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
extern crate std;
#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use storage::{
    is_initialized, load_config, load_state, load_user_info, save_config, save_state,
    save_user_info,
};
pub use types::{CampaignState, PaymentAsset, Phase, PresaleConfig, SaleConfig, UserInfo};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidPayment = 1,
    NotStarted = 2,
    NotWhitelisted = 3,
    SaleOver = 4,
    InvalidAmount = 5,
    UserCapReached = 6,
    CapReached = 7,
    Unauthorized = 8,
    AlreadyInitialized = 9,
    NotInitialized = 10,
    InvalidConfig = 11,
}

impl From<PresaleError> for Error {
    fn from(err: PresaleError) -> Self {
        match err {
            PresaleError::InvalidPayment => Error::InvalidPayment,
            PresaleError::NotStarted => Error::NotStarted,
            PresaleError::NotWhitelisted => Error::NotWhitelisted,
            PresaleError::SaleOver => Error::SaleOver,
            PresaleError::InvalidAmount => Error::InvalidAmount,
            PresaleError::UserCapReached => Error::UserCapReached,
            PresaleError::CapReached => Error::CapReached,
            PresaleError::Unauthorized => Error::Unauthorized,
        }
    }
}

#[contract]
pub struct TokenPresale;

#[contractimpl]
impl TokenPresale {
    /// Configure the sale. Can only run once.
    ///
    /// - `owner` must authorize the call and is the only address that can withdraw.
    /// - `payment` selects the asset buyers pay with; `PaymentAsset::Native` resolves
    ///   to `native_asset`, the network's native asset contract.
    /// - `whitelist_token` gates the whitelist window; with `None` every buyer holds 0.
    /// - `sale_token` is the token being sold, recorded for reference only.
    /// - `params` are the nine positional sale parameters: min buy, max buy, soft cap,
    ///   hard cap, whitelist threshold, whitelist duration (hours), tokens to sell,
    ///   public duration (hours), start time.
    pub fn init(
        env: Env,
        owner: Address,
        payment: PaymentAsset,
        native_asset: Address,
        whitelist_token: Option<Address>,
        sale_token: Option<Address>,
        params: Vec<i128>,
    ) -> PresaleConfig {
        owner.require_auth();

        if is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }

        if params.len() as usize != PARAM_COUNT {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        let mut values = [0i128; PARAM_COUNT];
        for (slot, value) in values.iter_mut().zip(params.iter()) {
            *slot = value;
        }
        let sale = presale_core::SaleConfig::from_params(&values)
            .unwrap_or_else(|_| panic_with_error!(&env, Error::InvalidConfig));

        let payment_token = match &payment {
            PaymentAsset::Native => native_asset,
            PaymentAsset::Token(token) => token.clone(),
        };

        let config = PresaleConfig {
            payment,
            payment_token: payment_token.clone(),
            whitelist_token,
            sale_token,
            sale: sale.into(),
        };
        save_config(&env, &config);
        save_state(
            &env,
            &CampaignState {
                owner: owner.clone(),
                total_raised: 0,
            },
        );

        events::emit_presale_initialized(
            &env,
            owner,
            payment_token,
            sale.hard_cap,
            sale.start_time,
        );

        config
    }

    /// Buy into the sale with `amount` of `payment_token`.
    ///
    /// The ledger timestamp is read once and decides the phase for the whole call.
    /// Checks run in order: payment asset, phase, whitelist balance (whitelist
    /// window only), amount bounds, the buyer's max-buy allowance, the hard cap.
    /// On success the payment moves from `buyer` to the contract.
    pub fn buy_token(env: Env, buyer: Address, payment_token: Address, amount: i128) -> UserInfo {
        buyer.require_auth();

        let config = load_config(&env);
        if payment_token != config.payment_token {
            panic_with_error!(&env, Error::InvalidPayment);
        }

        let mut state = load_state(&env);
        let ctx = PurchaseContext {
            now: env.ledger().timestamp(),
            total_raised: state.total_raised,
            user: load_user_info(&env, &buyer).into(),
        };
        let sale = presale_core::SaleConfig::from(&config.sale);
        let purchase = evaluate_purchase(&sale, ctx, amount, || {
            whitelist_balance(&env, &config, &buyer)
        })
        .unwrap_or_else(|err| panic_with_error!(&env, Error::from(err)));

        let token_client = token::Client::new(&env, &config.payment_token);
        token_client.transfer(&buyer, &env.current_contract_address(), &amount);

        state.total_raised = purchase.total_raised;
        save_state(&env, &state);

        let info = UserInfo::from(purchase.user);
        save_user_info(&env, &buyer, &info);

        events::emit_tokens_purchased(
            &env,
            buyer,
            amount,
            purchase.phase.into(),
            purchase.total_raised,
        );

        info
    }

    /// Send the contract's whole payment-token balance to the owner.
    ///
    /// Returns the amount sent; zero when there is nothing to withdraw.
    pub fn withdraw(env: Env, caller: Address) -> i128 {
        caller.require_auth();

        let config = load_config(&env);
        let state = load_state(&env);
        if caller != state.owner {
            panic_with_error!(&env, Error::Unauthorized);
        }

        let token_client = token::Client::new(&env, &config.payment_token);
        let amount = token_client.balance(&env.current_contract_address());
        if amount > 0 {
            token_client.transfer(&env.current_contract_address(), &state.owner, &amount);
        }

        events::emit_funds_withdrawn(&env, state.owner, amount);

        amount
    }

    /// Payment-token balance currently held by the contract.
    pub fn balance(env: Env) -> i128 {
        let config = load_config(&env);
        token::Client::new(&env, &config.payment_token).balance(&env.current_contract_address())
    }

    pub fn owner(env: Env) -> Address {
        load_state(&env).owner
    }

    pub fn get_config(env: Env) -> PresaleConfig {
        load_config(&env)
    }

    pub fn total_raised(env: Env) -> i128 {
        load_state(&env).total_raised
    }

    /// Contribution record of `user`; zeros if they never bought.
    pub fn user_info(env: Env, user: Address) -> UserInfo {
        if !is_initialized(&env) {
            panic_with_error!(&env, Error::NotInitialized);
        }
        load_user_info(&env, &user)
    }

    /// Sale phase at the current ledger timestamp.
    pub fn phase(env: Env) -> Phase {
        let config = load_config(&env);
        let sale = presale_core::SaleConfig::from(&config.sale);
        phase_at(&sale, env.ledger().timestamp()).into()
    }

    pub fn soft_cap_reached(env: Env) -> bool {
        let config = load_config(&env);
        let sale = presale_core::SaleConfig::from(&config.sale);
        sale.soft_cap_reached(load_state(&env).total_raised)
    }
}

fn whitelist_balance(env: &Env, config: &PresaleConfig, buyer: &Address) -> i128 {
    match &config.whitelist_token {
        Some(token) => token::Client::new(env, token).balance(buyer),
        None => 0,
    }
}
