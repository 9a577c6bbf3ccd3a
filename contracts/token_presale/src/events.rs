use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::Phase;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleInitialized {
    pub owner: Address,
    pub payment_token: Address,
    pub hard_cap: i128,
    pub start_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchased {
    pub buyer: Address,
    pub amount: i128,
    pub phase: Phase,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub owner: Address,
    pub amount: i128,
}

pub fn emit_presale_initialized(
    env: &Env,
    owner: Address,
    payment_token: Address,
    hard_cap: i128,
    start_time: u64,
) {
    let topics = (symbol_short!("init"),);
    let data = PresaleInitialized {
        owner,
        payment_token,
        hard_cap,
        start_time,
    };
    env.events().publish(topics, data);
}

pub fn emit_tokens_purchased(
    env: &Env,
    buyer: Address,
    amount: i128,
    phase: Phase,
    total_raised: i128,
) {
    let topics = (symbol_short!("purchased"), buyer.clone());
    let data = TokensPurchased {
        buyer,
        amount,
        phase,
        total_raised,
    };
    env.events().publish(topics, data);
}

pub fn emit_funds_withdrawn(env: &Env, owner: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), owner.clone());
    let data = FundsWithdrawn { owner, amount };
    env.events().publish(topics, data);
}
