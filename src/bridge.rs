use crate::{
    dependencies::receipt_token::ReceiptTokenClient,
    errors::BridgeError,
    events::BridgeEvents,
    math::{checked_add, ray_mul},
    reserve::Reserve,
    user::UserCollateral,
    validator::{require_nonnegative, validate_deposit, validate_unbacked_mint_cap},
};
use soroban_sdk::{token::TokenClient, Address, Env};

/// Mints receipt tokens to `on_behalf_of` without supplying the underlying asset.
/// The minted amount is tracked as the reserve's unbacked amount until it is backed.
///
/// ### Arguments
/// * `caller` - The bridge address initiating the mint
/// * `asset` - The reserve asset
/// * `amount` - The amount of underlying the receipt tokens are worth
/// * `on_behalf_of` - The address receiving the receipt tokens
/// * `referral_code` - Forwarded to the `bridged` event
///
/// ### Panics
/// * If the reserve does not exist or does not accept deposits
/// * If the amount is not positive
/// * If the unbacked mint cap would be exceeded
pub fn mint_unbacked(
    e: &Env,
    caller: &Address,
    asset: &Address,
    amount: i128,
    on_behalf_of: &Address,
    referral_code: u32,
) {
    let mut reserve = Reserve::load(e, asset);
    let mut snapshot = reserve.take_snapshot(e);
    reserve.advance_state(e, &mut snapshot);

    validate_deposit(e, &snapshot, amount);

    reserve.increase_unbacked(e, amount);
    validate_unbacked_mint_cap(e, &snapshot, reserve.unbacked);

    // the mint is rated like a deposit even though no underlying moves
    reserve.refresh_rates(e, &snapshot, amount, 0);
    reserve.store(e);

    let is_first_deposit = ReceiptTokenClient::new(e, &snapshot.receipt_token).mint(
        caller,
        on_behalf_of,
        &amount,
        &snapshot.next_liquidity_index,
    );

    if is_first_deposit {
        let mut user = UserCollateral::load(e, on_behalf_of.clone());
        user.set_using_as_collateral(e, snapshot.reserve_id, true);
        user.store(e);
        BridgeEvents::collateral_enabled(e, asset, on_behalf_of);
    }

    BridgeEvents::bridged(e, asset, caller, on_behalf_of, amount, referral_code);
}

/// Backs previously minted unbacked receipt tokens. The caller always pays `amount + fee`.
/// Any part of `amount` above the reserve's unbacked amount is distributed to receipt token
/// holders together with `fee`.
///
/// ### Arguments
/// * `caller` - The address paying the underlying
/// * `asset` - The reserve asset
/// * `amount` - The amount of underlying used to back unbacked receipt tokens
/// * `fee` - The amount of underlying paid as a fee to receipt token holders
///
/// ### Returns
/// * `i128` - The amount of unbacked receipt tokens that were backed
///
/// ### Panics
/// * If the reserve does not exist
/// * If `amount` or `fee` is negative
/// * If the receipt token has no supply
/// * If the caller cannot pay `amount + fee`
pub fn back_unbacked(e: &Env, caller: &Address, asset: &Address, amount: i128, fee: i128) -> i128 {
    require_nonnegative(e, amount, BridgeError::InvalidAmount);
    require_nonnegative(e, fee, BridgeError::InvalidAmount);
    let total_payment = checked_add(e, amount, fee);

    let mut reserve = Reserve::load(e, asset);
    let mut snapshot = reserve.take_snapshot(e);
    reserve.advance_state(e, &mut snapshot);

    let (backing_amount, total_fee) = split_backing(e, reserve.unbacked, amount, fee);

    let scaled_supply = ReceiptTokenClient::new(e, &snapshot.receipt_token).scaled_total_supply();
    let total_supply = ray_mul(e, scaled_supply, snapshot.next_liquidity_index);
    snapshot.next_liquidity_index = reserve.cumulate_to_liquidity_index(e, total_supply, total_fee);

    reserve.refresh_rates(e, &snapshot, total_fee, 0);
    reserve.decrease_unbacked(e, backing_amount);
    reserve.store(e);

    TokenClient::new(e, asset).transfer(caller, &snapshot.receipt_token, &total_payment);

    BridgeEvents::backed(e, asset, caller, backing_amount, total_fee);
    backing_amount
}

/// Splits a backing payment into the part that repays unbacked tokens and the part
/// that is distributed as a fee
///
/// ### Returns
/// * `(i128, i128)` - (The backing amount, the total fee)
pub fn split_backing(e: &Env, unbacked: i128, amount: i128, fee: i128) -> (i128, i128) {
    let backing_amount = amount.min(unbacked);
    let total_fee = checked_add(e, fee, amount - backing_amount);
    (backing_amount, total_fee)
}
