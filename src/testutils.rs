#![cfg(any(test, feature = "testutils"))]

use crate::{
    constants::SCALAR_7, storage::ONE_DAY_LEDGERS, types::ReserveConfig, UnbackedBridge,
    UnbackedBridgeClient,
};
use soroban_sdk::{
    testutils::{Address as _, Events, Ledger as _, LedgerInfo},
    token::{StellarAssetClient, TokenClient},
    Address, Env, Symbol, TryFromVal, Val, Vec,
};

/// Register the bridge contract. Generates an admin if none is provided.
pub fn register_bridge(e: &Env, admin: Option<Address>) -> Address {
    let admin = admin.unwrap_or_else(|| Address::generate(e));
    e.register(UnbackedBridge {}, (admin,))
}

/// An active reserve with 7 decimals, a 10% reserve factor, no supply cap and
/// a 1M token unbacked mint cap
pub fn default_reserve_config() -> ReserveConfig {
    ReserveConfig {
        decimals: 7,
        active: true,
        paused: false,
        frozen: false,
        reserve_factor: 0_1000000,
        supply_cap: 0,
        unbacked_mint_cap: 1_000_000,
    }
}

pub struct TestReserve<'a> {
    pub asset: Address,
    pub asset_client: StellarAssetClient<'a>,
    pub asset_token: TokenClient<'a>,
    pub receipt_token: mock_receipt_token::MockReceiptTokenClient<'a>,
    pub rate_model: mock_rate_model::MockRateModelClient<'a>,
}

/// Deploy an asset, receipt token and rate model and initialize them as a reserve of the bridge.
/// Requires auths to be mocked.
///
/// ### Arguments
/// * `bridge` - The bridge contract
/// * `config` - The reserve configuration
/// * `liquidity_rate` - The liquidity rate the rate model returns, 27 decimals
pub fn create_reserve<'a>(
    e: &Env,
    bridge: &Address,
    config: ReserveConfig,
    liquidity_rate: i128,
) -> TestReserve<'a> {
    let asset = e
        .register_stellar_asset_contract_v2(Address::generate(e))
        .address();
    let receipt_token = mock_receipt_token::register_mock_receipt_token(e, bridge, &asset);
    let rate_model = mock_rate_model::register_mock_rate_model(e, liquidity_rate, 0);

    UnbackedBridgeClient::new(e, bridge).init_reserve(
        &asset,
        &receipt_token.address,
        &rate_model.address,
        &config,
    );
    TestReserve {
        asset_client: StellarAssetClient::new(e, &asset),
        asset_token: TokenClient::new(e, &asset),
        asset,
        receipt_token,
        rate_model,
    }
}

pub trait EnvTestUtils {
    /// Jump the env by the given amount of ledgers. Assumes 5 seconds per ledger.
    fn jump(&self, ledgers: u32);

    /// Jump the env by the given amount of seconds. Assumes 5 seconds per ledger.
    fn jump_time(&self, seconds: u64);

    /// Set the ledger to the default LedgerInfo
    ///
    /// Time -> 1441065600 (Sept 1st, 2015 12:00:00 AM UTC)
    /// Sequence -> 100
    fn set_default_info(&self);
}

impl EnvTestUtils for Env {
    fn jump(&self, ledgers: u32) {
        self.jump_time(ledgers as u64 * 5);
    }

    fn jump_time(&self, seconds: u64) {
        self.ledger().set(LedgerInfo {
            timestamp: self.ledger().timestamp().saturating_add(seconds),
            protocol_version: 22,
            sequence_number: self
                .ledger()
                .sequence()
                .saturating_add((seconds / 5) as u32),
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 500 * ONE_DAY_LEDGERS,
            min_persistent_entry_ttl: 500 * ONE_DAY_LEDGERS,
            max_entry_ttl: 1000 * ONE_DAY_LEDGERS,
        });
    }

    fn set_default_info(&self) {
        self.ledger().set(LedgerInfo {
            timestamp: 1441065600, // Sept 1st, 2015 12:00:00 AM UTC
            protocol_version: 22,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 500 * ONE_DAY_LEDGERS,
            min_persistent_entry_ttl: 500 * ONE_DAY_LEDGERS,
            max_entry_ttl: 1000 * ONE_DAY_LEDGERS,
        });
    }
}

/// Fetch the names of the events published by `contract`, in publish order
pub fn contract_event_names(e: &Env, contract: &Address) -> std::vec::Vec<Symbol> {
    e.events()
        .all()
        .iter()
        .filter(|(address, _, _)| address == contract)
        .filter_map(|(_, topics, _)| {
            topics
                .get(0)
                .and_then(|topic| Symbol::try_from_val(e, &topic).ok())
        })
        .collect()
}

/// Fetch the topics and data of the last event named `name` published by `contract`
pub fn last_contract_event(e: &Env, contract: &Address, name: &str) -> Option<(Vec<Val>, Val)> {
    let name = Symbol::new(e, name);
    e.events()
        .all()
        .iter()
        .filter(|(address, topics, _)| {
            address == contract
                && topics
                    .get(0)
                    .and_then(|topic| Symbol::try_from_val(e, &topic).ok())
                    .map_or(false, |topic| topic == name)
        })
        .map(|(_, topics, data)| (topics, data))
        .last()
}

/// Asset that `b` is within `percentage` of `a` where `percentage`
/// is a percentage in decimal form as a fixed-point number with 7 decimal
/// places
pub fn assert_approx_eq_rel(a: i128, b: i128, percentage: i128) {
    let rel_delta = b * percentage / SCALAR_7;

    assert!(
        a >= b - rel_delta && a <= b + rel_delta,
        "assertion failed: `(left != right)` \
         (left: `{:?}`, right: `{:?}`, epsilon: `{:?}`)",
        a,
        b,
        rel_delta
    );
}

pub mod mock_receipt_token {
    use crate::{
        dependencies::receipt_token::ReceiptToken,
        errors::BridgeError,
        math::{checked_add, ray_div, ray_mul},
        UnbackedBridgeClient,
    };
    use soroban_sdk::{contract, contractimpl, contracttype, panic_with_error, Address, Env};

    #[derive(Clone)]
    #[contracttype]
    pub enum MockReceiptTokenKey {
        Bridge,
        Asset,
        Supply,
        Balance(Address),
    }

    /// A receipt token that stores balances scaled by the liquidity index
    #[contract]
    pub struct MockReceiptToken;

    fn scaled_balance(e: &Env, user: &Address) -> i128 {
        e.storage()
            .instance()
            .get(&MockReceiptTokenKey::Balance(user.clone()))
            .unwrap_or(0)
    }

    fn scaled_supply(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&MockReceiptTokenKey::Supply)
            .unwrap_or(0)
    }

    #[contractimpl]
    impl MockReceiptToken {
        pub fn __constructor(e: Env, bridge: Address, asset: Address) {
            e.storage().instance().set(&MockReceiptTokenKey::Bridge, &bridge);
            e.storage().instance().set(&MockReceiptTokenKey::Asset, &asset);
        }

        /// Fetch the balance of `user` in underlying at the bridge's normalized income
        pub fn balance(e: Env, user: Address) -> i128 {
            let bridge: Address = e
                .storage()
                .instance()
                .get(&MockReceiptTokenKey::Bridge)
                .unwrap();
            let asset: Address = e
                .storage()
                .instance()
                .get(&MockReceiptTokenKey::Asset)
                .unwrap();
            let index = UnbackedBridgeClient::new(&e, &bridge).get_normalized_income(&asset);
            ray_mul(&e, scaled_balance(&e, &user), index)
        }
    }

    #[contractimpl]
    impl ReceiptToken for MockReceiptToken {
        fn mint(e: Env, _caller: Address, on_behalf_of: Address, amount: i128, index: i128) -> bool {
            let bridge: Address = e
                .storage()
                .instance()
                .get(&MockReceiptTokenKey::Bridge)
                .unwrap();
            bridge.require_auth();

            let scaled_amount = ray_div(&e, amount, index);
            if scaled_amount <= 0 {
                panic_with_error!(&e, BridgeError::InvalidAmount);
            }
            let prev_balance = scaled_balance(&e, &on_behalf_of);
            e.storage().instance().set(
                &MockReceiptTokenKey::Balance(on_behalf_of),
                &checked_add(&e, prev_balance, scaled_amount),
            );
            e.storage().instance().set(
                &MockReceiptTokenKey::Supply,
                &checked_add(&e, scaled_supply(&e), scaled_amount),
            );
            prev_balance == 0
        }

        fn scaled_total_supply(e: Env) -> i128 {
            scaled_supply(&e)
        }

        fn scaled_balance_of(e: Env, user: Address) -> i128 {
            scaled_balance(&e, &user)
        }
    }

    pub fn register_mock_receipt_token<'a>(
        e: &Env,
        bridge: &Address,
        asset: &Address,
    ) -> MockReceiptTokenClient<'a> {
        let address = e.register(MockReceiptToken {}, (bridge.clone(), asset.clone()));
        MockReceiptTokenClient::new(e, &address)
    }
}

pub mod mock_rate_model {
    use crate::dependencies::rate_model::{CalculateRatesParams, InterestRates, RateModel};
    use soroban_sdk::{contract, contractimpl, contracttype, Env};

    #[derive(Clone)]
    #[contracttype]
    pub enum MockRateModelKey {
        Rates,
        LastParams,
    }

    /// A rate model that returns fixed rates and records the last request
    #[contract]
    pub struct MockRateModel;

    #[contractimpl]
    impl MockRateModel {
        pub fn __constructor(e: Env, liquidity_rate: i128, borrow_rate: i128) {
            Self::set_rates(e, liquidity_rate, borrow_rate);
        }

        pub fn set_rates(e: Env, liquidity_rate: i128, borrow_rate: i128) {
            e.storage().instance().set(
                &MockRateModelKey::Rates,
                &InterestRates {
                    liquidity_rate,
                    borrow_rate,
                },
            );
        }

        pub fn last_params(e: Env) -> Option<CalculateRatesParams> {
            e.storage().instance().get(&MockRateModelKey::LastParams)
        }
    }

    #[contractimpl]
    impl RateModel for MockRateModel {
        fn calculate_interest_rates(e: Env, params: CalculateRatesParams) -> InterestRates {
            e.storage()
                .instance()
                .set(&MockRateModelKey::LastParams, &params);
            e.storage()
                .instance()
                .get(&MockRateModelKey::Rates)
                .unwrap()
        }
    }

    pub fn register_mock_rate_model<'a>(
        e: &Env,
        liquidity_rate: i128,
        borrow_rate: i128,
    ) -> MockRateModelClient<'a> {
        let address = e.register(MockRateModel {}, (liquidity_rate, borrow_rate));
        MockRateModelClient::new(e, &address)
    }
}
