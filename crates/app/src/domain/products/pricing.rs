//! Product pricing.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price after applying a percentage discount, rounded to whole cents.
pub fn special_price(price: Decimal, discount: Decimal) -> Decimal {
    (price - price * discount / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Cost of `quantity` units at `unit_price`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_price_without_discount_is_the_price() {
        assert_eq!(
            special_price(Decimal::new(1999, 2), Decimal::ZERO),
            Decimal::new(1999, 2)
        );
    }

    #[test]
    fn special_price_applies_percentage() {
        assert_eq!(
            special_price(Decimal::new(2500, 2), Decimal::new(20, 0)),
            Decimal::new(2000, 2)
        );
    }

    #[test]
    fn special_price_rounds_half_cents_away_from_zero() {
        // 9.99 * 0.85 = 8.4915
        assert_eq!(
            special_price(Decimal::new(999, 2), Decimal::new(15, 0)),
            Decimal::new(849, 2)
        );

        // 0.05 * 0.5 = 0.025
        assert_eq!(
            special_price(Decimal::new(5, 2), Decimal::new(50, 0)),
            Decimal::new(3, 2)
        );
    }

    #[test]
    fn full_discount_is_free() {
        assert_eq!(
            special_price(Decimal::new(1999, 2), Decimal::ONE_HUNDRED),
            Decimal::ZERO
        );
    }

    #[test]
    fn line_total_multiplies_by_quantity() {
        assert_eq!(line_total(Decimal::new(1999, 2), 2), Decimal::new(3998, 2));
        assert_eq!(line_total(Decimal::new(1999, 2), 0), Decimal::ZERO);
    }
}
