use crate::{
    constants::{RAY, SECONDS_PER_YEAR},
    errors::BridgeError,
};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{panic_with_error, Env, I256};

/// Computes `x * y / denominator` rounding down. Falls back to 256 bit intermediates
/// if `x * y` does not fit in an i128.
///
/// ### Panics
/// * `ArithmeticError` - If the denominator is not positive, an input is negative,
///   or the result does not fit in an i128
pub fn mul_div_floor(e: &Env, x: i128, y: i128, denominator: i128) -> i128 {
    if denominator <= 0 || x < 0 || y < 0 {
        panic_with_error!(e, BridgeError::ArithmeticError);
    }
    match x.fixed_mul_floor(y, denominator) {
        Some(result) => result,
        None => I256::from_i128(e, x)
            .mul(&I256::from_i128(e, y))
            .div(&I256::from_i128(e, denominator))
            .to_i128()
            .unwrap_or_else(|| panic_with_error!(e, BridgeError::ArithmeticError)),
    }
}

/// Multiplies two ray values, rounding down
pub fn ray_mul(e: &Env, a: i128, b: i128) -> i128 {
    mul_div_floor(e, a, b, RAY)
}

/// Divides `a` by `b` as ray values, rounding down
///
/// ### Panics
/// * `ArithmeticError` - If `b` is zero
pub fn ray_div(e: &Env, a: i128, b: i128) -> i128 {
    mul_div_floor(e, a, RAY, b)
}

/// Checked addition that aborts the invocation on overflow
pub fn checked_add(e: &Env, a: i128, b: i128) -> i128 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(e, BridgeError::ArithmeticError))
}

/// Calculates the interest accumulated with a linear model between `last_update` and now
///
/// ### Arguments
/// * `rate` - The annual rate, 27 decimals
/// * `last_update` - The timestamp interest was last accumulated at
///
/// ### Returns
/// * `i128` - The growth factor, 27 decimals. `RAY` if no time has passed.
pub fn calculate_linear_interest(e: &Env, rate: i128, last_update: u64) -> i128 {
    let now = e.ledger().timestamp();
    if now <= last_update {
        return RAY;
    }
    let elapsed = (now - last_update) as i128;
    let accrued = mul_div_floor(e, rate, elapsed, SECONDS_PER_YEAR);
    checked_add(e, RAY, accrued)
}
