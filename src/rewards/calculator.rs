use rust_decimal::Decimal;

/// Convert an invoice amount into reward points using the tiered formula:
///
/// - amounts up to 50 earn nothing
/// - each whole unit between 50 and 100 earns 1 point
/// - each whole unit above 100 earns 2 points
///
/// Continuous at the tier boundaries; negative amounts fall into the lowest
/// tier rather than being an error.
pub fn calculate(amount: Decimal) -> Decimal {
    let lower = Decimal::from(50);
    let upper = Decimal::ONE_HUNDRED;

    if amount <= lower {
        return Decimal::ZERO;
    }

    if amount <= upper {
        return amount - lower;
    }

    (amount - upper) * Decimal::TWO + lower
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(amount: i64) -> Decimal {
        calculate(Decimal::from(amount))
    }

    #[test]
    fn amounts_in_lowest_tier_earn_nothing() {
        assert_eq!(points(-1), Decimal::ZERO);
        assert_eq!(points(0), Decimal::ZERO);
        assert_eq!(points(1), Decimal::ZERO);
        assert_eq!(points(49), Decimal::ZERO);
        assert_eq!(points(50), Decimal::ZERO);
    }

    #[test]
    fn amounts_in_middle_tier_earn_one_point_per_unit() {
        assert_eq!(points(51), Decimal::from(1));
        assert_eq!(points(99), Decimal::from(49));
        assert_eq!(points(100), Decimal::from(50));
    }

    #[test]
    fn amounts_above_hundred_earn_double_points() {
        assert_eq!(points(101), Decimal::from(52));
        assert_eq!(points(120), Decimal::from(90));
        assert_eq!(points(546), Decimal::from(942));
    }

    #[test]
    fn formula_is_continuous_at_tier_boundaries() {
        assert_eq!(points(50), Decimal::ZERO);
        assert_eq!(points(100), Decimal::from(50));
    }

    #[test]
    fn fractional_amounts_keep_their_precision() {
        let amount = Decimal::new(1205, 1); // 120.5
        assert_eq!(calculate(amount), Decimal::new(910, 1)); // 50 + 2 * 20.5
    }

    #[test]
    fn calculation_is_repeatable() {
        let amount = Decimal::new(1235, 1);
        assert_eq!(calculate(amount), calculate(amount));
    }
}
