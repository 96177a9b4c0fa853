#![cfg(test)]

use crate::{
    constants::{RAY, SECONDS_PER_YEAR},
    testutils::{
        create_reserve, default_reserve_config, last_contract_event, register_bridge,
        EnvTestUtils,
    },
    UnbackedBridgeClient,
};
use soroban_sdk::{testutils::Address as _, Address, Env, Error, TryFromVal};

#[test]
fn test_back_unbacked_partial() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &1000_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &610_0000000);

    let backed = bridge_client.back_unbacked(&bombadil, &reserve.asset, &600_0000000, &10_0000000);
    assert_eq!(backed, 600_0000000);

    let (topics, data) = last_contract_event(&e, &bridge, "backed").unwrap();
    assert_eq!(
        Address::try_from_val(&e, &topics.get_unchecked(1)).unwrap(),
        reserve.asset
    );
    assert_eq!(
        Address::try_from_val(&e, &topics.get_unchecked(2)).unwrap(),
        bombadil
    );
    assert_eq!(
        <(i128, i128)>::try_from_val(&e, &data).unwrap(),
        (600_0000000, 10_0000000)
    );

    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.unbacked, 400_0000000);
    // the fee is spread over 1000 tokens of supply
    assert_eq!(reserve_data.liquidity_index, 1_01 * RAY / 100);

    // the caller paid the backing and the fee to the receipt token
    assert_eq!(reserve.asset_token.balance(&bombadil), 0);
    assert_eq!(
        reserve.asset_token.balance(&reserve.receipt_token.address),
        610_0000000
    );
    assert_eq!(reserve.receipt_token.balance(&frodo), 1010_0000000);
    // backing does not mint receipt tokens
    assert_eq!(reserve.receipt_token.scaled_total_supply(), 1000_0000000);
}

#[test]
fn test_back_unbacked_excess_becomes_fee() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &100_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &155_0000000);

    let backed = bridge_client.back_unbacked(&bombadil, &reserve.asset, &150_0000000, &5_0000000);
    assert_eq!(backed, 100_0000000);

    let (_, data) = last_contract_event(&e, &bridge, "backed").unwrap();
    assert_eq!(
        <(i128, i128)>::try_from_val(&e, &data).unwrap(),
        (100_0000000, 55_0000000)
    );

    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.unbacked, 0);
    assert_eq!(reserve_data.liquidity_index, 1_55 * RAY / 100);

    // the full amount plus fee is always pulled
    assert_eq!(reserve.asset_token.balance(&bombadil), 0);
    assert_eq!(
        reserve.asset_token.balance(&reserve.receipt_token.address),
        155_0000000
    );
    assert_eq!(reserve.receipt_token.balance(&frodo), 155_0000000);

    // once everything is backed, any further backing is a fee
    reserve.asset_client.mint(&bombadil, &10_0000000);
    let backed = bridge_client.back_unbacked(&bombadil, &reserve.asset, &10_0000000, &0);
    assert_eq!(backed, 0);
    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.unbacked, 0);
    assert!(reserve_data.liquidity_index > 1_55 * RAY / 100);
}

#[test]
fn test_back_unbacked_large_excess() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &100_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &100_000_0000000);

    // excess over the unbacked amount is not capped
    let backed = bridge_client.back_unbacked(&bombadil, &reserve.asset, &100_000_0000000, &0);
    assert_eq!(backed, 100_0000000);

    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.unbacked, 0);
    assert_eq!(reserve_data.liquidity_index, 1000 * RAY);
    assert_eq!(reserve.receipt_token.balance(&frodo), 100_000_0000000);
}

#[test]
fn test_back_unbacked_zero_fee() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &1000_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &600_0000000);

    let backed = bridge_client.back_unbacked(&bombadil, &reserve.asset, &600_0000000, &0);
    assert_eq!(backed, 600_0000000);

    let (_, data) = last_contract_event(&e, &bridge, "backed").unwrap();
    assert_eq!(
        <(i128, i128)>::try_from_val(&e, &data).unwrap(),
        (600_0000000, 0)
    );

    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.unbacked, 400_0000000);
    assert_eq!(reserve_data.liquidity_index, RAY);
    assert_eq!(reserve.receipt_token.balance(&frodo), 1000_0000000);
}

#[test]
fn test_back_unbacked_zero_fee_accrues_interest() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    // 10% liquidity rate
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), RAY / 10);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &1000_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &600_0000000);

    e.jump_time(SECONDS_PER_YEAR as u64 / 2);
    bridge_client.back_unbacked(&bombadil, &reserve.asset, &600_0000000, &0);

    // only time moved the index
    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.liquidity_index, 1_05 * RAY / 100);
    assert_eq!(reserve_data.last_update_timestamp, e.ledger().timestamp());
    assert_eq!(reserve_data.unbacked, 400_0000000);
}

#[test]
fn test_back_unbacked_fee_on_top_of_interest() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), RAY / 10);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &1000_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &1011_0000000);

    // a year at 10% grows the supply to 1100 tokens, the 11 token fee adds another 1%
    e.jump_time(SECONDS_PER_YEAR as u64);
    bridge_client.back_unbacked(&bombadil, &reserve.asset, &1000_0000000, &11_0000000);

    let reserve_data = bridge_client.get_reserve_data(&reserve.asset);
    assert_eq!(reserve_data.liquidity_index, 1_111 * RAY / 1000);
    assert_eq!(reserve_data.unbacked, 0);
    assert_eq!(reserve.receipt_token.balance(&frodo), 1111_0000000);
}

#[test]
fn test_back_unbacked_invalid_inputs() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &100_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &1000_0000000);
    let pre_data = bridge_client.get_reserve_data(&reserve.asset);

    assert_eq!(
        bridge_client
            .try_back_unbacked(&bombadil, &reserve.asset, &-1, &0)
            .err(),
        Some(Ok(Error::from_contract_error(102)))
    );
    assert_eq!(
        bridge_client
            .try_back_unbacked(&bombadil, &reserve.asset, &10_0000000, &-1)
            .err(),
        Some(Ok(Error::from_contract_error(102)))
    );
    assert_eq!(
        bridge_client
            .try_back_unbacked(&bombadil, &Address::generate(&e), &10_0000000, &0)
            .err(),
        Some(Ok(Error::from_contract_error(100)))
    );

    assert_eq!(bridge_client.get_reserve_data(&reserve.asset), pre_data);
    assert_eq!(reserve.asset_token.balance(&bombadil), 1000_0000000);
}

#[test]
fn test_back_unbacked_insufficient_balance() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);
    let frodo = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);

    bridge_client.mint_unbacked(&bombadil, &reserve.asset, &100_0000000, &frodo, &0);
    reserve.asset_client.mint(&bombadil, &50_0000000);
    let pre_data = bridge_client.get_reserve_data(&reserve.asset);

    // the ledger was already written when the transfer fails, the whole call reverts
    let result = bridge_client.try_back_unbacked(&bombadil, &reserve.asset, &50_0000000, &1_0000000);
    assert!(result.is_err());

    assert_eq!(bridge_client.get_reserve_data(&reserve.asset), pre_data);
    assert_eq!(reserve.asset_token.balance(&bombadil), 50_0000000);
    assert_eq!(
        reserve.asset_token.balance(&reserve.receipt_token.address),
        0
    );
}

#[test]
fn test_back_unbacked_no_supply() {
    let e = Env::default();
    e.mock_all_auths();
    e.set_default_info();

    let bombadil = Address::generate(&e);

    let bridge = register_bridge(&e, None);
    let bridge_client = UnbackedBridgeClient::new(&e, &bridge);
    let reserve = create_reserve(&e, &bridge, default_reserve_config(), 0);
    reserve.asset_client.mint(&bombadil, &10_0000000);

    assert_eq!(
        bridge_client
            .try_back_unbacked(&bombadil, &reserve.asset, &0, &1_0000000)
            .err(),
        Some(Ok(Error::from_contract_error(109)))
    );
    // a zero fee still requires receipt token supply
    assert_eq!(
        bridge_client
            .try_back_unbacked(&bombadil, &reserve.asset, &0, &0)
            .err(),
        Some(Ok(Error::from_contract_error(109)))
    );
    assert_eq!(reserve.asset_token.balance(&bombadil), 10_0000000);
}
