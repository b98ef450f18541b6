//! Numeric grains and the shared reduction rule.
//!
//! Every numeric stat payload (plain integers, durations, percentages and
//! ranges) reduces through the same integer pipeline:
//!
//! ```text
//! base (last overwrite, else 0) → + Σ adds → × (10000 + Σ increases) / 10000
//! ```
//!
//! The final division rounds half to even on the exact quotient, which is
//! what the game's balance tables were tuned against.

use crate::error::ValueParseError;
use crate::operation::NumericGroups;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Basis points in one whole unit (10000 bp = 100%).
pub const BASIS_POINTS_PER_UNIT: i32 = 10_000;

/// Trait for payload types that numeric stats can reduce.
///
/// Implementors project themselves onto one or more integer grains and
/// run [`compute_grain`] over each of them.
pub trait NumericValue:
    Copy
    + Eq
    + Default
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// The value used as base when no overwrite is recorded.
    fn zero() -> Self;

    /// Reduce a kind-partitioned set of operations to a single value.
    fn compute(groups: &NumericGroups<Self>) -> Self;

    /// Parse a value from its text form.
    fn parse_value(input: &str) -> Result<Self, ValueParseError>;
}

/// Compute `input * basis_points / 10000`, rounding half to even.
///
/// # Examples
///
/// ```rust
/// use nightstat::numeric::fraction_basis_points;
///
/// assert_eq!(fraction_basis_points(115, 12_000), 138);
/// assert_eq!(fraction_basis_points(1, 10_500), 1);
/// assert_eq!(fraction_basis_points(1, 15_000), 2); // 1.5 → 2
/// assert_eq!(fraction_basis_points(5, 5_000), 2); // 2.5 → 2
/// ```
pub fn fraction_basis_points(input: i32, basis_points: i32) -> i32 {
    saturate(round_div(
        i128::from(input) * i128::from(basis_points),
        i128::from(BASIS_POINTS_PER_UNIT),
    ))
}

/// Run the overwrite → add → increase pipeline over one integer grain.
///
/// `grain` projects a payload onto the integer being reduced, e.g. the low
/// end of a range.
pub fn compute_grain<V, F>(groups: &NumericGroups<V>, grain: F) -> i32
where
    F: Fn(&V) -> i32,
{
    let base = groups.overwrites.last().map(&grain).unwrap_or(0);
    let added: i128 = groups.adds.iter().map(|v| i128::from(grain(v))).sum();
    let additive = i128::from(base) + added;

    // No floor at zero: a large enough reduction flips the sign.
    let multiplier: i128 = i128::from(BASIS_POINTS_PER_UNIT)
        + groups
            .increases
            .iter()
            .map(|p| i128::from(p.basis_points()))
            .sum::<i128>();

    let product = additive.saturating_mul(multiplier);
    saturate(round_div(product, i128::from(BASIS_POINTS_PER_UNIT)))
}

fn round_div(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);
    match (remainder * 2).cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}

fn saturate(value: i128) -> i32 {
    value.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

impl NumericValue for i32 {
    fn zero() -> Self {
        0
    }

    fn compute(groups: &NumericGroups<Self>) -> Self {
        compute_grain(groups, |i| *i)
    }

    fn parse_value(input: &str) -> Result<Self, ValueParseError> {
        input
            .trim()
            .parse()
            .map_err(|_| ValueParseError::InvalidInt(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::NumericOperation;
    use crate::value::PercentageValue;

    fn groups(ops: &[NumericOperation<i32>]) -> NumericGroups<i32> {
        NumericGroups::from_operations(ops.iter())
    }

    #[test]
    fn test_round_div_half_even() {
        assert_eq!(round_div(25, 10), 2);
        assert_eq!(round_div(35, 10), 4);
        assert_eq!(round_div(-25, 10), -2);
        assert_eq!(round_div(-35, 10), -4);
        assert_eq!(round_div(-26, 10), -3);
        assert_eq!(round_div(24, 10), 2);
    }

    #[test]
    fn test_fraction_basis_points() {
        assert_eq!(fraction_basis_points(100, 10_000), 100);
        assert_eq!(fraction_basis_points(100, 5_000), 50);
        assert_eq!(fraction_basis_points(3, 5_000), 2); // 1.5 → 2
        assert_eq!(fraction_basis_points(-3, 5_000), -2);
    }

    #[test]
    fn test_compute_empty_is_zero() {
        assert_eq!(i32::compute(&groups(&[])), 0);
    }

    #[test]
    fn test_compute_order() {
        let ops = [
            NumericOperation::Increase(PercentageValue::from_percent(20)),
            NumericOperation::Add(5),
            NumericOperation::Overwrite(100),
            NumericOperation::Add(10),
        ];
        assert_eq!(i32::compute(&groups(&ops)), 138);
    }

    #[test]
    fn test_negative_multiplier_flips_sign() {
        let ops = [
            NumericOperation::Add(10),
            NumericOperation::Increase(PercentageValue::from_basis_points(-15_000)),
        ];
        assert_eq!(i32::compute(&groups(&ops)), -5);
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let ops = [
            NumericOperation::Add(i32::MAX),
            NumericOperation::Increase(PercentageValue::from_percent(100)),
        ];
        assert_eq!(i32::compute(&groups(&ops)), i32::MAX);
    }

    #[test]
    fn test_saturates_with_huge_increases() {
        let ops = [
            NumericOperation::Add(i32::MAX),
            NumericOperation::Increase(PercentageValue::from_basis_points(i32::MAX)),
            NumericOperation::Increase(PercentageValue::from_basis_points(i32::MAX)),
        ];
        assert_eq!(i32::compute(&groups(&ops)), i32::MAX);

        let negative = [
            NumericOperation::Add(i32::MAX),
            NumericOperation::Add(i32::MAX),
            NumericOperation::Increase(PercentageValue::from_basis_points(i32::MIN)),
            NumericOperation::Increase(PercentageValue::from_basis_points(i32::MIN)),
        ];
        assert_eq!(i32::compute(&groups(&negative)), i32::MIN);
    }

    #[test]
    fn test_fraction_saturates() {
        assert_eq!(fraction_basis_points(i32::MAX, i32::MAX), i32::MAX);
        assert_eq!(fraction_basis_points(i32::MIN, i32::MAX), i32::MIN);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(i32::parse_value(" 42 ").unwrap(), 42);
        assert!(i32::parse_value("4x").is_err());
    }
}
