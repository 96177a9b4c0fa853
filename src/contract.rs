use crate::{
    bridge,
    constants::{MAX_RESERVES, RAY},
    errors::BridgeError,
    events::BridgeEvents,
    reserve::Reserve,
    storage,
    types::{ReserveConfig, ReserveData},
    user::UserCollateral,
    validator::validate_reserve_config,
};

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Vec};

#[contract]
pub struct UnbackedBridge;

#[contractimpl]
impl UnbackedBridge {
    /// Initialize the contract
    ///
    /// ### Arguments
    /// * `admin` - The admin address
    pub fn __constructor(e: Env, admin: Address) {
        admin.require_auth();
        storage::set_admin(&e, &admin);
    }

    //********** Read-Only ***********//

    /// Get the admin address
    pub fn get_admin(e: Env) -> Address {
        storage::get_admin(&e)
    }

    /// Get the reserve assets, ordered by reserve id
    pub fn get_reserve_list(e: Env) -> Vec<Address> {
        storage::get_reserve_list(&e)
    }

    /// Get the ledger of a reserve
    ///
    /// ### Arguments
    /// * `asset` - The reserve asset
    ///
    /// ### Panics
    /// * `ReserveNotFound` - If the reserve does not exist
    pub fn get_reserve_data(e: Env, asset: Address) -> ReserveData {
        storage::get_reserve_data(&e, &asset)
            .unwrap_or_else(|| panic_with_error!(&e, BridgeError::ReserveNotFound))
    }

    /// Get the configuration of a reserve
    ///
    /// ### Panics
    /// * `ReserveNotFound` - If the reserve does not exist
    pub fn get_reserve_config(e: Env, asset: Address) -> ReserveConfig {
        storage::get_reserve_config(&e, &asset)
            .unwrap_or_else(|| panic_with_error!(&e, BridgeError::ReserveNotFound))
    }

    /// Get the liquidity index of a reserve compounded to the current ledger timestamp.
    /// Receipt token balances are their scaled balance multiplied by this value.
    ///
    /// ### Returns
    /// * `i128` - The normalized income, 27 decimals
    pub fn get_normalized_income(e: Env, asset: Address) -> i128 {
        Reserve::load(&e, &asset).normalized_income(&e)
    }

    /// Get the collateral bitmap of a user. Bit `n` is set if reserve `n` is used as collateral.
    pub fn get_user_collateral(e: Env, user: Address) -> u128 {
        storage::get_user_collateral(&e, &user)
    }

    /// Check if a reserve counts as collateral for a user
    ///
    /// ### Panics
    /// * `ReserveNotFound` - If the reserve does not exist
    pub fn is_using_as_collateral(e: Env, user: Address, asset: Address) -> bool {
        let reserve = Reserve::load(&e, &asset);
        UserCollateral::load(&e, user).is_using_as_collateral(reserve.id)
    }

    //********** Read-Write ***********//

    // ADMIN ONLY
    /// Sets the admin address
    ///
    /// ### Arguments
    /// * `admin` - The new admin address to set
    pub fn set_admin(e: Env, admin: Address) {
        storage::extend_instance(&e);
        admin.require_auth();
        storage::get_admin(&e).require_auth();
        storage::set_admin(&e, &admin);
        BridgeEvents::set_admin(&e, &admin);
    }

    // ADMIN ONLY
    /// Initializes the ledger of a new reserve
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset of the reserve
    /// * `receipt_token` - The receipt token minted against the reserve
    /// * `rate_model` - The interest rate model of the reserve
    /// * `config` - The reserve configuration
    ///
    /// ### Panics
    /// * `ReserveAlreadyExists` - If the reserve was already initialized
    /// * `MaxReservesReached` - If the maximum number of reserves was reached
    /// * `InvalidReserveConfig` - If the configuration is invalid
    pub fn init_reserve(
        e: Env,
        asset: Address,
        receipt_token: Address,
        rate_model: Address,
        config: ReserveConfig,
    ) {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        if storage::get_reserve_data(&e, &asset).is_some() {
            panic_with_error!(&e, BridgeError::ReserveAlreadyExists);
        }
        validate_reserve_config(&e, &config);

        let mut reserve_list = storage::get_reserve_list(&e);
        let id = reserve_list.len();
        if id >= MAX_RESERVES {
            panic_with_error!(&e, BridgeError::MaxReservesReached);
        }
        reserve_list.push_back(asset.clone());
        storage::set_reserve_list(&e, &reserve_list);

        storage::set_reserve_data(
            &e,
            &asset,
            &ReserveData {
                id,
                receipt_token: receipt_token.clone(),
                rate_model,
                liquidity_index: RAY,
                liquidity_rate: 0,
                borrow_rate: 0,
                unbacked: 0,
                last_update_timestamp: e.ledger().timestamp(),
            },
        );
        storage::set_reserve_config(&e, &asset, &config);
        BridgeEvents::init_reserve(&e, &asset, &receipt_token, id);
    }

    // ADMIN ONLY
    /// Updates the configuration of a reserve
    ///
    /// ### Panics
    /// * `ReserveNotFound` - If the reserve does not exist
    /// * `InvalidReserveConfig` - If the configuration is invalid
    pub fn set_reserve_config(e: Env, asset: Address, config: ReserveConfig) {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        if storage::get_reserve_config(&e, &asset).is_none() {
            panic_with_error!(&e, BridgeError::ReserveNotFound);
        }
        validate_reserve_config(&e, &config);
        storage::set_reserve_config(&e, &asset, &config);
        BridgeEvents::set_reserve_config(&e, &asset, &config);
    }

    /// Mints receipt tokens without supplying the underlying asset
    ///
    /// ### Arguments
    /// * `caller` - The bridge address minting the receipt tokens
    /// * `asset` - The reserve asset
    /// * `amount` - The amount of underlying the minted receipt tokens are worth
    /// * `on_behalf_of` - The address receiving the receipt tokens
    /// * `referral_code` - A referral code, only emitted
    pub fn mint_unbacked(
        e: Env,
        caller: Address,
        asset: Address,
        amount: i128,
        on_behalf_of: Address,
        referral_code: u32,
    ) {
        storage::extend_instance(&e);
        caller.require_auth();
        bridge::mint_unbacked(&e, &caller, &asset, amount, &on_behalf_of, referral_code);
    }

    /// Backs unbacked receipt tokens by paying `amount + fee` of the underlying asset
    ///
    /// ### Arguments
    /// * `caller` - The address paying the underlying
    /// * `asset` - The reserve asset
    /// * `amount` - The amount of underlying backing unbacked receipt tokens
    /// * `fee` - The fee paid to receipt token holders
    ///
    /// ### Returns
    /// * `i128` - The amount of unbacked receipt tokens backed
    pub fn back_unbacked(e: Env, caller: Address, asset: Address, amount: i128, fee: i128) -> i128 {
        storage::extend_instance(&e);
        caller.require_auth();
        bridge::back_unbacked(&e, &caller, &asset, amount, fee)
    }
}
