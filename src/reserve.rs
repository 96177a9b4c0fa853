use crate::{
    constants::RAY,
    dependencies::rate_model::{CalculateRatesParams, RateModelClient},
    errors::BridgeError,
    math::{self, calculate_linear_interest, ray_div, ray_mul},
    reserve_snapshot::ReserveSnapshot,
    storage,
    types::ReserveData,
};
use soroban_sdk::{panic_with_error, token::TokenClient, Address, Env};

/// The ledger of a single reserve
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reserve {
    pub asset: Address,               // The reserve's underlying asset
    pub id: u32,                      // The reserve's index in the user collateral bitmap
    pub receipt_token: Address,       // The receipt token minted against the reserve
    pub rate_model: Address,          // The interest rate model of the reserve
    pub liquidity_index: i128,        // The cumulative liquidity index, 27 decimals
    pub liquidity_rate: i128,         // The annual supply rate, 27 decimals
    pub borrow_rate: i128,            // The annual borrow rate, 27 decimals
    pub unbacked: i128,               // The amount minted without backing
    pub last_update_timestamp: u64,   // The timestamp of the last index update
}

impl Reserve {
    /// Load the reserve ledger for `asset`
    ///
    /// ### Panics
    /// * `ReserveNotFound` - If the reserve does not exist
    pub fn load(e: &Env, asset: &Address) -> Self {
        let data = storage::get_reserve_data(e, asset)
            .unwrap_or_else(|| panic_with_error!(e, BridgeError::ReserveNotFound));

        Self {
            asset: asset.clone(),
            id: data.id,
            receipt_token: data.receipt_token,
            rate_model: data.rate_model,
            liquidity_index: data.liquidity_index,
            liquidity_rate: data.liquidity_rate,
            borrow_rate: data.borrow_rate,
            unbacked: data.unbacked,
            last_update_timestamp: data.last_update_timestamp,
        }
    }

    pub fn store(&self, e: &Env) {
        let data = ReserveData {
            id: self.id,
            receipt_token: self.receipt_token.clone(),
            rate_model: self.rate_model.clone(),
            liquidity_index: self.liquidity_index,
            liquidity_rate: self.liquidity_rate,
            borrow_rate: self.borrow_rate,
            unbacked: self.unbacked,
            last_update_timestamp: self.last_update_timestamp,
        };
        storage::set_reserve_data(e, &self.asset, &data);
    }

    /// Reads the ledger and the reserve's config into a snapshot. Does not mutate the reserve.
    ///
    /// ### Panics
    /// * `ReserveNotFound` - If the reserve has no config
    pub fn take_snapshot(&self, e: &Env) -> ReserveSnapshot {
        let config = storage::get_reserve_config(e, &self.asset)
            .unwrap_or_else(|| panic_with_error!(e, BridgeError::ReserveNotFound));
        ReserveSnapshot {
            asset: self.asset.clone(),
            reserve_id: self.id,
            config,
            receipt_token: self.receipt_token.clone(),
            rate_model: self.rate_model.clone(),
            curr_liquidity_index: self.liquidity_index,
            next_liquidity_index: self.liquidity_index,
            liquidity_rate: self.liquidity_rate,
            borrow_rate: self.borrow_rate,
            unbacked: self.unbacked,
            last_update_timestamp: self.last_update_timestamp,
        }
    }

    /// Fetch the liquidity index compounded to the current timestamp without updating the reserve
    pub fn normalized_income(&self, e: &Env) -> i128 {
        if self.liquidity_rate == 0 || e.ledger().timestamp() <= self.last_update_timestamp {
            return self.liquidity_index;
        }
        let cumulated = calculate_linear_interest(e, self.liquidity_rate, self.last_update_timestamp);
        ray_mul(e, cumulated, self.liquidity_index)
    }

    /// Compounds the interest accrued since the last update into the liquidity index and
    /// records the result as the snapshot's next liquidity index.
    ///
    /// Must be called once per operation, before anything depends on the index.
    pub fn advance_state(&mut self, e: &Env, snapshot: &mut ReserveSnapshot) {
        let now = e.ledger().timestamp();
        if now > self.last_update_timestamp {
            self.liquidity_index = self.normalized_income(e);
            self.last_update_timestamp = now;
        }
        snapshot.next_liquidity_index = self.liquidity_index;
    }

    /// Recalculates the reserve's rates from the rate model after a liquidity change
    ///
    /// ### Arguments
    /// * `snapshot` - The snapshot of the current operation
    /// * `liquidity_added` - The liquidity entering the reserve
    /// * `liquidity_taken` - The liquidity leaving the reserve
    ///
    /// ### Panics
    /// * `InvalidInterestRate` - If the rate model returns a negative rate
    pub fn refresh_rates(
        &mut self,
        e: &Env,
        snapshot: &ReserveSnapshot,
        liquidity_added: i128,
        liquidity_taken: i128,
    ) {
        let available_liquidity =
            TokenClient::new(e, &snapshot.asset).balance(&snapshot.receipt_token);
        let rates = RateModelClient::new(e, &snapshot.rate_model).calculate_interest_rates(
            &CalculateRatesParams {
                asset: snapshot.asset.clone(),
                unbacked: self.unbacked,
                liquidity_added,
                liquidity_taken,
                available_liquidity,
                reserve_factor: snapshot.config.reserve_factor,
            },
        );
        if rates.liquidity_rate < 0 || rates.borrow_rate < 0 {
            panic_with_error!(e, BridgeError::InvalidInterestRate);
        }
        self.liquidity_rate = rates.liquidity_rate;
        self.borrow_rate = rates.borrow_rate;
    }

    /// Distributes `amount` to all receipt token holders by growing the liquidity index
    ///
    /// ### Arguments
    /// * `total_supply` - The total supply of receipt tokens in underlying
    /// * `amount` - The amount of underlying to distribute
    ///
    /// ### Returns
    /// * `i128` - The new liquidity index
    ///
    /// ### Panics
    /// * `NoReceiptSupply` - If the total supply is not positive
    pub fn cumulate_to_liquidity_index(&mut self, e: &Env, total_supply: i128, amount: i128) -> i128 {
        if total_supply <= 0 {
            panic_with_error!(e, BridgeError::NoReceiptSupply);
        }
        if amount == 0 {
            return self.liquidity_index;
        }
        let growth = math::checked_add(e, ray_div(e, amount, total_supply), RAY);
        self.liquidity_index = ray_mul(e, growth, self.liquidity_index);
        self.liquidity_index
    }

    pub fn increase_unbacked(&mut self, e: &Env, amount: i128) {
        self.unbacked = math::checked_add(e, self.unbacked, amount);
    }

    /// ### Panics
    /// * `BalanceError` - If `amount` exceeds the unbacked amount
    pub fn decrease_unbacked(&mut self, e: &Env, amount: i128) {
        if amount > self.unbacked {
            panic_with_error!(e, BridgeError::BalanceError);
        }
        self.unbacked -= amount;
    }
}
