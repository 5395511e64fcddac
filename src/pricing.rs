//! Money arithmetic for carts and orders.
//!
//! Everything here is pure: handlers resolve rows from the database and feed
//! them through these functions. All amounts are `BigDecimal` rounded to two
//! places, matching the NUMERIC(12, 2) columns.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use crate::models::cart::CartLine;

/// Country label applied to cart lines when the shopper's country is unknown
/// or inactive. Carries a 0% tax rate.
pub const FALLBACK_COUNTRY: &str = "United Kingdom";

/// A resolved tax policy: the display label stored on the cart line and the
/// tax rate as a decimal fraction (e.g. 20% -> 0.20).
#[derive(Debug, Clone, PartialEq)]
pub struct TaxPolicy {
    pub country: String,
    pub rate: BigDecimal,
}

impl TaxPolicy {
    pub fn for_country(name: &str, tax_rate_percent: i32) -> Self {
        TaxPolicy {
            country: name.to_string(),
            rate: BigDecimal::from(tax_rate_percent) / BigDecimal::from(100),
        }
    }

    pub fn fallback() -> Self {
        TaxPolicy {
            country: FALLBACK_COUNTRY.to_string(),
            rate: BigDecimal::zero(),
        }
    }
}

/// Lookup key for the countries table: trimmed and case-folded, so
/// `" France "` and `"france"` resolve to the same row.
pub fn normalize_country(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Tax fee and line total for a unit price under the given policy.
/// The invariant `total == price + tax_fee` holds exactly.
pub fn line_amounts(price: &BigDecimal, policy: &TaxPolicy) -> (BigDecimal, BigDecimal) {
    let tax_fee = (price * &policy.rate).with_scale_round(2, RoundingMode::HalfUp);
    let total = (price + &tax_fee).with_scale_round(2, RoundingMode::HalfUp);
    (tax_fee, total)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    pub price: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

impl CartTotals {
    pub fn zero() -> Self {
        CartTotals {
            price: BigDecimal::zero().with_scale(2),
            tax: BigDecimal::zero().with_scale(2),
            total: BigDecimal::zero().with_scale(2),
        }
    }
}

/// Sums price, tax and total independently across the lines of one cart
/// session. The summed total is taken from the stored per-line totals, not
/// recomputed from price + tax.
pub fn cart_totals<'a, I>(lines: I) -> CartTotals
where
    I: IntoIterator<Item = &'a CartLine>,
{
    lines.into_iter().fold(CartTotals::zero(), |acc, line| CartTotals {
        price: acc.price + &line.price,
        tax: acc.tax + &line.tax_fee,
        total: acc.total + &line.total,
    })
}

/// Arithmetic mean of review ratings. `None` when there are no ratings;
/// callers must keep "no rating yet" distinct from any numeric value.
pub fn average_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

/// Amount taken off an order item by a percent coupon, rounded to cents.
pub fn coupon_discount(total: &BigDecimal, discount_percent: i32) -> BigDecimal {
    (total * BigDecimal::from(discount_percent) / BigDecimal::from(100))
        .with_scale_round(2, RoundingMode::HalfUp)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn line(price: &str, tax: &str, total: &str) -> CartLine {
        CartLine {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            user_id: None,
            price: dec(price),
            tax_fee: dec(tax),
            total: dec(total),
            country: "France".to_string(),
            cart_id: "123456".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn line_amounts_hold_total_invariant() {
        let policy = TaxPolicy::for_country("France", 20);
        let price = dec("19.99");
        let (tax_fee, total) = line_amounts(&price, &policy);
        assert_eq!(tax_fee, dec("4.00"));
        assert_eq!(total, dec("23.99"));
        assert_eq!(total, price + tax_fee);
    }

    #[test]
    fn line_amounts_round_half_up_to_cents() {
        // 10.05 * 5% = 0.5025 -> 0.50
        let policy = TaxPolicy::for_country("Denmark", 5);
        let (tax_fee, total) = line_amounts(&dec("10.05"), &policy);
        assert_eq!(tax_fee, dec("0.50"));
        assert_eq!(total, dec("10.55"));
    }

    #[test]
    fn fallback_policy_is_zero_rated() {
        let policy = TaxPolicy::fallback();
        assert_eq!(policy.country, "United Kingdom");
        let (tax_fee, total) = line_amounts(&dec("19.99"), &policy);
        assert_eq!(tax_fee, dec("0.00"));
        assert_eq!(total, dec("19.99"));
    }

    #[test]
    fn normalize_country_trims_and_case_folds() {
        assert_eq!(normalize_country("  France "), "france");
        assert_eq!(normalize_country("UNITED KINGDOM"), "united kingdom");
    }

    #[test]
    fn cart_totals_sums_each_column_independently() {
        // The second line was saved with a drifted total on purpose: the sum
        // must reflect the stored column, not price + tax.
        let lines = vec![
            line("10.00", "2.00", "12.00"),
            line("5.00", "0.25", "5.30"),
        ];
        let totals = cart_totals(&lines);
        assert_eq!(totals.price, dec("15.00"));
        assert_eq!(totals.tax, dec("2.25"));
        assert_eq!(totals.total, dec("17.30"));
    }

    #[test]
    fn cart_totals_of_no_lines_is_zero() {
        let totals = cart_totals(&[]);
        assert_eq!(totals, CartTotals::zero());
        assert_eq!(totals.total, dec("0.00"));
    }

    #[test]
    fn average_rating_of_no_reviews_is_absent() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn average_rating_is_arithmetic_mean() {
        assert_eq!(average_rating(&[3, 4, 5]), Some(4.0));
        assert_eq!(average_rating(&[1, 2]), Some(1.5));
        assert_eq!(average_rating(&[5]), Some(5.0));
    }

    #[test]
    fn coupon_discount_is_percent_of_total() {
        assert_eq!(coupon_discount(&dec("50.00"), 10), dec("5.00"));
        // 19.99 * 15% = 2.9985 -> 3.00
        assert_eq!(coupon_discount(&dec("19.99"), 15), dec("3.00"));
        assert_eq!(coupon_discount(&dec("20.00"), 0), dec("0.00"));
    }
}
