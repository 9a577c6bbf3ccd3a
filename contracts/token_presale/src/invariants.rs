// Property tests over random purchase sequences against a live contract.
//
// Invariants:
//   - total_raised equals the sum of accepted purchases
//   - total_raised never exceeds the hard cap
//   - the contract's token balance equals total_raised until a withdrawal
//   - no buyer's combined contribution exceeds max buy
//   - a non-owner withdrawal never moves funds

extern crate std;

use proptest::prelude::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env,
};
use std::vec::Vec as StdVec;

use crate::{Error, PaymentAsset, TokenPresale, TokenPresaleClient};

const ONE: i128 = 10_000_000;
const START: u64 = 1_000_000;
const BUYERS: usize = 4;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_caps_hold_over_random_purchases(
        buys in proptest::collection::vec((0..BUYERS, 0i128..20 * ONE), 1..24),
        hard_cap in 20i128..80,
    ) {
        let env = Env::default();
        env.mock_all_auths();
        let contract_id = env.register(TokenPresale, ());
        let client = TokenPresaleClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        let admin = Address::generate(&env);
        let native = env.register_stellar_asset_contract_v2(admin).address();
        let native_admin = token::StellarAssetClient::new(&env, &native);
        let native_client = token::Client::new(&env, &native);

        let hard_cap = hard_cap * ONE;
        let params = vec![
            &env,
            3 * ONE / 10,
            15 * ONE,
            0,
            hard_cap,
            0,
            0,
            0,
            24,
            START as i128,
        ];
        client.init(&owner, &PaymentAsset::Native, &native, &None, &None, &params);
        env.ledger().set_timestamp(START);

        let buyers: StdVec<Address> = (0..BUYERS)
            .map(|_| {
                let buyer = Address::generate(&env);
                native_admin.mint(&buyer, &(1_000 * ONE));
                buyer
            })
            .collect();

        let mut accepted = 0i128;
        for (index, amount) in buys {
            let buyer = &buyers[index];
            match client.try_buy_token(buyer, &native, &amount) {
                Ok(_) => accepted += amount,
                Err(Ok(err)) => prop_assert!(matches!(
                    err,
                    Error::InvalidAmount | Error::UserCapReached | Error::CapReached
                )),
                Err(Err(err)) => panic!("unexpected invoke error: {err:?}"),
            }

            let total = client.total_raised();
            prop_assert_eq!(total, accepted);
            prop_assert!(total <= hard_cap);
            prop_assert_eq!(client.balance(), total);
            prop_assert!(client.user_info(buyer).bought <= 15 * ONE);
        }

        let intruder = &buyers[0];
        prop_assert_eq!(client.try_withdraw(intruder), Err(Ok(Error::Unauthorized)));
        prop_assert_eq!(client.balance(), accepted);

        prop_assert_eq!(client.withdraw(&owner), accepted);
        prop_assert_eq!(native_client.balance(&owner), accepted);
        prop_assert_eq!(client.withdraw(&owner), 0);
    }
}
