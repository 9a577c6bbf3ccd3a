extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{FundsWithdrawn, PresaleInitialized, TokensPurchased};
use crate::{PaymentAsset, Phase, TokenPresale, TokenPresaleClient};

const ONE: i128 = 10_000_000;
const START: u64 = 1_000_000;

fn setup() -> (Env, TokenPresaleClient<'static>, Address, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(TokenPresale, ());
    let client = TokenPresaleClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let addr = env.register_stellar_asset_contract_v2(token_admin).address();
    let native = token::Client::new(&env, &addr);

    // No whitelist window, 24h public window, hard cap 200.
    let params = vec![
        &env,
        ONE,
        15 * ONE,
        0,
        200 * ONE,
        0,
        0,
        0,
        24,
        START as i128,
    ];
    client.init(
        &owner,
        &PaymentAsset::Native,
        &native.address,
        &None,
        &None,
        &params,
    );
    (env, client, owner, native)
}

#[test]
fn test_presale_initialized_event() {
    let (env, client, owner, native) = setup();

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("init").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PresaleInitialized = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PresaleInitialized {
            owner,
            payment_token: native.address.clone(),
            hard_cap: 200 * ONE,
            start_time: START,
        }
    );
}

#[test]
fn test_tokens_purchased_event() {
    let (env, client, _, native) = setup();
    let buyer = Address::generate(&env);
    token::StellarAssetClient::new(&env, &native.address).mint(&buyer, &(10 * ONE));
    env.ledger().set_timestamp(START);

    client.buy_token(&buyer, &native.address, &(10 * ONE));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("purchased"), buyer)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("purchased").into_val(&env),
        buyer.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensPurchased = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        TokensPurchased {
            buyer: buyer.clone(),
            amount: 10 * ONE,
            phase: Phase::Public,
            total_raised: 10 * ONE,
        }
    );
}

#[test]
fn test_funds_withdrawn_event() {
    let (env, client, owner, native) = setup();
    let buyer = Address::generate(&env);
    token::StellarAssetClient::new(&env, &native.address).mint(&buyer, &(10 * ONE));
    env.ledger().set_timestamp(START);
    client.buy_token(&buyer, &native.address, &(4 * ONE));

    client.withdraw(&owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("withdrawn").into_val(&env),
        owner.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            owner: owner.clone(),
            amount: 4 * ONE,
        }
    );
}
