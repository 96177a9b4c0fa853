use soroban_sdk::{Address, Env, Symbol};

use crate::types::ReserveConfig;

pub struct BridgeEvents {}

impl BridgeEvents {
    /// Emitted when a new reserve is initialized
    ///
    /// - topics - `["init_reserve", asset: Address]`
    /// - data - `[receipt_token: Address, reserve_id: u32]`
    pub fn init_reserve(e: &Env, asset: &Address, receipt_token: &Address, reserve_id: u32) {
        let topics = (Symbol::new(&e, "init_reserve"), asset.clone());
        e.events().publish(topics, (receipt_token.clone(), reserve_id));
    }

    /// Emitted when a reserve's configuration is updated
    ///
    /// - topics - `["set_reserve_config", asset: Address]`
    /// - data - `config: ReserveConfig`
    pub fn set_reserve_config(e: &Env, asset: &Address, config: &ReserveConfig) {
        let topics = (Symbol::new(&e, "set_reserve_config"), asset.clone());
        e.events().publish(topics, config.clone());
    }

    /// Emitted when the admin is changed
    ///
    /// - topics - `["set_admin", admin: Address]`
    /// - data - Void
    pub fn set_admin(e: &Env, admin: &Address) {
        let topics = (Symbol::new(&e, "set_admin"), admin.clone());
        e.events().publish(topics, ());
    }

    /// Emitted when a reserve starts counting as collateral for a user
    ///
    /// - topics - `["collateral_enabled", asset: Address, user: Address]`
    /// - data - Void
    pub fn collateral_enabled(e: &Env, asset: &Address, user: &Address) {
        let topics = (
            Symbol::new(&e, "collateral_enabled"),
            asset.clone(),
            user.clone(),
        );
        e.events().publish(topics, ());
    }

    /// Emitted when receipt tokens are minted without backing
    ///
    /// - topics - `["bridged", asset: Address, caller: Address, on_behalf_of: Address]`
    /// - data - `[amount: i128, referral_code: u32]`
    pub fn bridged(
        e: &Env,
        asset: &Address,
        caller: &Address,
        on_behalf_of: &Address,
        amount: i128,
        referral_code: u32,
    ) {
        let topics = (
            Symbol::new(&e, "bridged"),
            asset.clone(),
            caller.clone(),
            on_behalf_of.clone(),
        );
        e.events().publish(topics, (amount, referral_code));
    }

    /// Emitted when unbacked receipt tokens are backed
    ///
    /// - topics - `["backed", asset: Address, caller: Address]`
    /// - data - `[backing_amount: i128, total_fee: i128]`
    pub fn backed(e: &Env, asset: &Address, caller: &Address, backing_amount: i128, total_fee: i128) {
        let topics = (Symbol::new(&e, "backed"), asset.clone(), caller.clone());
        e.events().publish(topics, (backing_amount, total_fee));
    }
}
