use soroban_sdk::{panic_with_error, Env};

use crate::{
    constants::SCALAR_7,
    dependencies::receipt_token::ReceiptTokenClient,
    errors::BridgeError,
    math::{checked_add, ray_mul},
    reserve_snapshot::ReserveSnapshot,
    types::ReserveConfig,
};

/// Require that an incoming amount is positive
///
/// ### Arguments
/// * `amount` - The amount to check
/// * `err` - The error to panic with if the amount is non-positive
///
/// ### Panics
/// If the number is negative or zero
pub fn require_positive(e: &Env, amount: i128, err: BridgeError) {
    if amount <= 0 {
        panic_with_error!(e, err);
    }
}

/// Require that an incoming amount is not negative
///
/// ### Panics
/// If the number is negative
pub fn require_nonnegative(e: &Env, amount: i128, err: BridgeError) {
    if amount < 0 {
        panic_with_error!(e, err);
    }
}

/// Validates that `amount` can be supplied to the reserve
///
/// ### Arguments
/// * `snapshot` - The snapshot of the reserve, with its state advanced to now
/// * `amount` - The amount of underlying being supplied
///
/// ### Panics
/// * `InvalidAmount` - If the amount is not positive
/// * `ReserveInactive` / `ReservePaused` / `ReserveFrozen` - If the reserve does not accept supply
/// * `SupplyCapExceeded` - If the supply would exceed the reserve's supply cap
pub fn validate_deposit(e: &Env, snapshot: &ReserveSnapshot, amount: i128) {
    require_positive(e, amount, BridgeError::InvalidAmount);

    let config = &snapshot.config;
    if !config.active {
        panic_with_error!(e, BridgeError::ReserveInactive);
    }
    if config.paused {
        panic_with_error!(e, BridgeError::ReservePaused);
    }
    if config.frozen {
        panic_with_error!(e, BridgeError::ReserveFrozen);
    }

    if config.supply_cap != 0 {
        let scaled_supply =
            ReceiptTokenClient::new(e, &snapshot.receipt_token).scaled_total_supply();
        let supply = ray_mul(e, scaled_supply, snapshot.next_liquidity_index);
        if checked_add(e, supply, amount) > to_base_units(e, config.supply_cap, config.decimals) {
            panic_with_error!(e, BridgeError::SupplyCapExceeded);
        }
    }
}

/// Validates that the reserve's unbacked amount is within the unbacked mint cap
///
/// ### Panics
/// * `UnbackedMintCapExceeded` - If `unbacked` exceeds the cap
pub fn validate_unbacked_mint_cap(e: &Env, snapshot: &ReserveSnapshot, unbacked: i128) {
    let config = &snapshot.config;
    if unbacked > to_base_units(e, config.unbacked_mint_cap, config.decimals) {
        panic_with_error!(e, BridgeError::UnbackedMintCapExceeded);
    }
}

/// Validates a reserve configuration before it is stored
///
/// ### Panics
/// * `InvalidReserveConfig` - If any value is out of range
pub fn validate_reserve_config(e: &Env, config: &ReserveConfig) {
    if config.decimals > 18
        || config.reserve_factor < 0
        || config.reserve_factor > SCALAR_7
        || config.supply_cap < 0
        || config.unbacked_mint_cap < 0
    {
        panic_with_error!(e, BridgeError::InvalidReserveConfig);
    }
}

fn to_base_units(e: &Env, whole_tokens: i128, decimals: u32) -> i128 {
    10i128
        .checked_pow(decimals)
        .and_then(|scalar| whole_tokens.checked_mul(scalar))
        .unwrap_or_else(|| panic_with_error!(e, BridgeError::ArithmeticError))
}
