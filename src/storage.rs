use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Symbol, Vec};

use crate::types::{ReserveConfig, ReserveData};

//********** Storage Keys **********//

const ADMIN_KEY: &str = "Admin";
const RESERVE_LIST_KEY: &str = "ResList";

#[derive(Clone)]
#[contracttype]
pub enum BridgeDataKey {
    // The ledger of a reserve
    ResData(Address),
    // The configuration of a reserve
    ResConfig(Address),
    // The collateral bitmap of a user
    UserCollat(Address),
}

//********** Storage Utils **********//

pub const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5 seconds per ledger on average

const LEDGER_BUMP_SHARED: u32 = 31 * ONE_DAY_LEDGERS;
const LEDGER_THRESHOLD_SHARED: u32 = LEDGER_BUMP_SHARED - ONE_DAY_LEDGERS;

const LEDGER_BUMP_USER: u32 = 120 * ONE_DAY_LEDGERS;
const LEDGER_THRESHOLD_USER: u32 = LEDGER_BUMP_USER - 20 * ONE_DAY_LEDGERS;

/// Bump the instance lifetime by the defined amount
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/********** Instance **********/

/// Get the admin address
pub fn get_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get::<Symbol, Address>(&Symbol::new(e, ADMIN_KEY))
        .unwrap_optimized()
}

/// Set the admin address
pub fn set_admin(e: &Env, admin: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ADMIN_KEY), admin);
}

/// Get the list of reserve assets, ordered by reserve id
pub fn get_reserve_list(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get::<Symbol, Vec<Address>>(&Symbol::new(e, RESERVE_LIST_KEY))
        .unwrap_or(Vec::new(e))
}

/// Set the list of reserve assets
pub fn set_reserve_list(e: &Env, reserves: &Vec<Address>) {
    e.storage()
        .instance()
        .set::<Symbol, Vec<Address>>(&Symbol::new(e, RESERVE_LIST_KEY), reserves);
}

/********** Persistent **********/

/// Get a reserve's ledger
pub fn get_reserve_data(e: &Env, asset: &Address) -> Option<ReserveData> {
    let key = BridgeDataKey::ResData(asset.clone());
    let result = e.storage().persistent().get::<BridgeDataKey, ReserveData>(&key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
    }
    result
}

/// Set a reserve's ledger
pub fn set_reserve_data(e: &Env, asset: &Address, data: &ReserveData) {
    let key = BridgeDataKey::ResData(asset.clone());
    e.storage()
        .persistent()
        .set::<BridgeDataKey, ReserveData>(&key, data);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/// Get a reserve's configuration
pub fn get_reserve_config(e: &Env, asset: &Address) -> Option<ReserveConfig> {
    let key = BridgeDataKey::ResConfig(asset.clone());
    let result = e
        .storage()
        .persistent()
        .get::<BridgeDataKey, ReserveConfig>(&key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
    }
    result
}

/// Set a reserve's configuration
pub fn set_reserve_config(e: &Env, asset: &Address, config: &ReserveConfig) {
    let key = BridgeDataKey::ResConfig(asset.clone());
    e.storage()
        .persistent()
        .set::<BridgeDataKey, ReserveConfig>(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/// Get a user's collateral bitmap. Bit `n` is set if reserve `n` is used as collateral.
pub fn get_user_collateral(e: &Env, user: &Address) -> u128 {
    let key = BridgeDataKey::UserCollat(user.clone());
    let result = e.storage().persistent().get::<BridgeDataKey, u128>(&key);
    match result {
        Some(flags) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
            flags
        }
        None => 0,
    }
}

/// Set a user's collateral bitmap
pub fn set_user_collateral(e: &Env, user: &Address, flags: u128) {
    let key = BridgeDataKey::UserCollat(user.clone());
    e.storage()
        .persistent()
        .set::<BridgeDataKey, u128>(&key, &flags);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}
