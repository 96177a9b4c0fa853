use soroban_sdk::contracterror;

/// The error codes for the contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum BridgeError {
    // Default errors to align with built-in contract
    BalanceError = 10,

    ReserveNotFound = 100,
    ReserveAlreadyExists = 101,
    InvalidAmount = 102,
    ReserveInactive = 103,
    ReservePaused = 104,
    ReserveFrozen = 105,
    SupplyCapExceeded = 106,
    UnbackedMintCapExceeded = 107,
    ArithmeticError = 108,
    NoReceiptSupply = 109,
    InvalidInterestRate = 110,
    MaxReservesReached = 111,
    InvalidReserveConfig = 112,
}
