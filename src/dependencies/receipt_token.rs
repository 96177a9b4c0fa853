use soroban_sdk::{contractclient, Address, Env};

/// The interest bearing token minted against a reserve. Balances are stored scaled
/// by the liquidity index at the time they were minted.
#[contractclient(name = "ReceiptTokenClient")]
pub trait ReceiptToken {
    /// Mints `amount` of receipt tokens to `on_behalf_of` at the given liquidity index
    ///
    /// ### Arguments
    /// * `caller` - The address initiating the mint
    /// * `on_behalf_of` - The address receiving the receipt tokens
    /// * `amount` - The amount of underlying the minted tokens are worth
    /// * `index` - The liquidity index of the reserve, 27 decimals
    ///
    /// ### Returns
    /// * `bool` - True if `on_behalf_of` held no receipt tokens before the mint
    fn mint(e: Env, caller: Address, on_behalf_of: Address, amount: i128, index: i128) -> bool;

    /// Fetch the total supply of receipt tokens, scaled by the liquidity index
    fn scaled_total_supply(e: Env) -> i128;

    /// Fetch the balance of `user`, scaled by the liquidity index
    fn scaled_balance_of(e: Env, user: Address) -> i128;
}
