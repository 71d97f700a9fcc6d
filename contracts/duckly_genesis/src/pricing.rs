//! Bulk-discount pricing.
//!
//! | Quantity | Discount |
//! |----------|----------|
//! | 1–2      | 0 %      |
//! | 3–4      | 10 %     |
//! | 5+       | 15 %     |
//!
//! The discounted cost is floored in the token's fixed-point scale.

use crate::Error;

/// Discount, in percent, applied to an order of `quantity` units.
pub fn discount_percent(quantity: u32) -> i128 {
    match quantity {
        0..=2 => 0,
        3..=4 => 10,
        _ => 15,
    }
}

/// `floor(quantity * unit_price * (100 - discount) / 100)`.
pub fn mint_cost(quantity: u32, unit_price: i128) -> Result<i128, Error> {
    i128::from(quantity)
        .checked_mul(unit_price)
        .and_then(|gross| gross.checked_mul(100 - discount_percent(quantity)))
        .map(|scaled| scaled / 100)
        .ok_or(Error::Overflow)
}

#[cfg(test)]
mod test {
    use super::*;

    const PRICE: i128 = 1_000_000_000_000_000_000;

    #[test]
    fn singles_and_pairs_pay_full_price() {
        assert_eq!(mint_cost(1, PRICE), Ok(PRICE));
        assert_eq!(mint_cost(2, PRICE), Ok(2 * PRICE));
    }

    #[test]
    fn three_and_four_get_ten_percent() {
        assert_eq!(mint_cost(3, PRICE), Ok(PRICE * 3 * 90 / 100));
        assert_eq!(mint_cost(4, PRICE), Ok(PRICE * 4 * 90 / 100));
    }

    #[test]
    fn five_and_more_get_fifteen_percent() {
        assert_eq!(mint_cost(5, PRICE), Ok(PRICE * 5 * 85 / 100));
        assert_eq!(mint_cost(10, PRICE), Ok(PRICE * 10 * 85 / 100));
    }

    #[test]
    fn cost_is_floored() {
        // 3 * 7 * 0.9 = 18.9
        assert_eq!(mint_cost(3, 7), Ok(18));
        // 5 * 3 * 0.85 = 12.75
        assert_eq!(mint_cost(5, 3), Ok(12));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(mint_cost(2, i128::MAX), Err(Error::Overflow));
    }
}
