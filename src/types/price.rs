//! Tick conversion for prices.
//!
//! Inside the book a price is a `u64` count of ticks, 10^8 ticks per unit.
//! At the boundary prices are `rust_decimal::Decimal`. Conversion is exact
//! in both directions: a decimal that would need rounding has no tick value,
//! so equal ticks always mean equal prices.
//!
//! ```
//! use limit_order_book::types::price::{format_ticks, parse_ticks};
//!
//! let ticks = parse_ticks("50000.12345678").unwrap();
//! assert_eq!(ticks, 5_000_012_345_678);
//! assert_eq!(format_ticks(ticks), "50000.12345678");
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Ticks per whole unit of price
pub const SCALE: u64 = 100_000_000;

/// Fractional digits representable in ticks
pub const PRICE_DECIMALS: u32 = 8;

/// Exact decimal to tick conversion.
///
/// `None` when the value is negative, carries more than
/// [`PRICE_DECIMALS`] significant fractional digits, or does not fit in a
/// `u64` once scaled. Zero converts to zero; rejecting it is up to the
/// caller.
///
/// ```
/// use limit_order_book::types::price::decimal_to_ticks;
/// use rust_decimal::Decimal;
///
/// assert_eq!(decimal_to_ticks(Decimal::new(1005, 1)), Some(10_050_000_000));
/// assert_eq!(decimal_to_ticks(Decimal::new(1, 9)), None);
/// ```
pub fn decimal_to_ticks(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() || d.normalize().scale() > PRICE_DECIMALS {
        return None;
    }
    d.checked_mul(Decimal::from(SCALE))?.to_u64()
}

/// Parse a decimal string straight to ticks (same rules as [`decimal_to_ticks`])
pub fn parse_ticks(s: &str) -> Option<u64> {
    Decimal::from_str(s).ok().and_then(decimal_to_ticks)
}

/// Ticks back to a decimal. Always exact.
pub fn ticks_to_decimal(ticks: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(ticks), PRICE_DECIMALS)
}

/// Shortest decimal rendering of a tick price (`150_000_000` is `"1.5"`)
pub fn format_ticks(ticks: u64) -> String {
    ticks_to_decimal(ticks).normalize().to_string()
}
