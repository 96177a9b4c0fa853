use soroban_sdk::{contractclient, contracttype, Address, Env};

/// The reserve state handed to the rate model when liquidity changes
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CalculateRatesParams {
    /// The reserve asset
    pub asset: Address,
    /// The amount of receipt tokens minted without backing
    pub unbacked: i128,
    /// The amount of liquidity entering the reserve
    pub liquidity_added: i128,
    /// The amount of liquidity leaving the reserve
    pub liquidity_taken: i128,
    /// The underlying held by the receipt token before the liquidity change
    pub available_liquidity: i128,
    /// The portion of interest kept by the protocol, 7 decimals
    pub reserve_factor: i128,
}

/// The annual rates of a reserve, 27 decimals
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct InterestRates {
    pub liquidity_rate: i128,
    pub borrow_rate: i128,
}

#[contractclient(name = "RateModelClient")]
pub trait RateModel {
    /// Calculates the liquidity and borrow rates of a reserve after a liquidity change
    fn calculate_interest_rates(e: Env, params: CalculateRatesParams) -> InterestRates;
}
