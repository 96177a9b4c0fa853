use soroban_sdk::{contracttype, Address};

/// The stored ledger of a reserve
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReserveData {
    /// The reserve's index in the user collateral bitmap
    pub id: u32,
    /// The receipt token minted against the reserve
    pub receipt_token: Address,
    /// The interest rate model consulted when liquidity changes
    pub rate_model: Address,
    /// The cumulative liquidity index, 27 decimals
    pub liquidity_index: i128,
    /// The current annual supply rate, 27 decimals
    pub liquidity_rate: i128,
    /// The current annual borrow rate, 27 decimals
    pub borrow_rate: i128,
    /// The amount of receipt tokens minted without backing
    pub unbacked: i128,
    /// The timestamp of the last index update
    pub last_update_timestamp: u64,
}

/// The admin controlled configuration of a reserve
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReserveConfig {
    /// The decimals of the underlying asset
    pub decimals: u32,
    pub active: bool,
    pub paused: bool,
    pub frozen: bool,
    /// The portion of interest kept by the protocol, 7 decimals
    pub reserve_factor: i128,
    /// The supply cap in whole tokens. Zero disables the cap.
    pub supply_cap: i128,
    /// The unbacked mint cap in whole tokens. Zero disables unbacked minting.
    pub unbacked_mint_cap: i128,
}
