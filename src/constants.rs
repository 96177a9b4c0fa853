/// 1 with 7 decimal places
pub const SCALAR_7: i128 = 1_0000000;
/// 1 with 27 decimal places (ray)
pub const RAY: i128 = 1_000_000_000_000_000_000_000_000_000;
// seconds per year
pub const SECONDS_PER_YEAR: i128 = 31536000;
/// The number of reserves a single collateral bitmap can address
pub const MAX_RESERVES: u32 = 128;
