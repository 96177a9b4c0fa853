use soroban_sdk::Address;

use crate::types::ReserveConfig;

/// A view of a reserve taken once at the start of an operation. The operation threads it
/// through validation and the rate model instead of re-reading the mutable ledger.
///
/// Only `advance_state` and `cumulate_to_liquidity_index` write `next_liquidity_index`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveSnapshot {
    pub asset: Address,
    pub reserve_id: u32,
    pub config: ReserveConfig,
    pub receipt_token: Address,
    pub rate_model: Address,
    /// The liquidity index when the snapshot was taken
    pub curr_liquidity_index: i128,
    /// The liquidity index the operation applies to balances
    pub next_liquidity_index: i128,
    pub liquidity_rate: i128,
    pub borrow_rate: i128,
    pub unbacked: i128,
    pub last_update_timestamp: u64,
}
