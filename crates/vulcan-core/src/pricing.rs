//! # Pricing Module
//!
//! Pure pricing functions: flat per-unit totals for standard items and
//! weight-derived totals for custom-cut items.
//!
//! ## Why Weight-Derived?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VOLUMETRIC PRICING                                                     │
//! │                                                                         │
//! │  Custom-cut goods are priced by estimated MASS, not by count.          │
//! │  The catalog carries one reference piece per product:                  │
//! │                                                                         │
//! │    reference: 48 x 26 x 1 weighing 120 kg                              │
//! │    density  = 120 / (48 * 26 * 1) = 0.0961... kg per unit volume       │
//! │                                                                         │
//! │  A requested cut scales by the same density (uniform material):        │
//! │                                                                         │
//! │    requested: 24 x 13 x 1  →  volume 312                               │
//! │    estimated weight = 312 * 0.0961... = 30 kg                          │
//! │    total = 30 kg * 500 /kg * qty 2 = 30000.00                          │
//! │                                                                         │
//! │  Every guard below exists so NaN/Infinity can never reach a persisted  │
//! │  total: bad input degrades to 0, a visibly-wrong-but-correctable       │
//! │  state, never a crash.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Dimensions, GeometrySnapshot};

// =============================================================================
// Numeric Helpers
// =============================================================================

/// Parses a string-encoded decimal, tolerating surrounding whitespace.
///
/// Returns `None` for anything that does not parse to a finite number.
/// This is the only place catalog/dimension strings are parsed.
pub fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Rounds to 2 decimal places, half-up.
///
/// Applied to monetary amounts at the point they become a line total or a
/// serialized figure; intermediate aggregation keeps full precision.
///
/// ## Example
/// ```rust
/// use vulcan_core::pricing::round2;
///
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(10.004), 10.0);
/// ```
#[inline]
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Standard Total
// =============================================================================

/// Flat total for a standard line item: `rate * quantity`.
///
/// If either input is not a finite, non-negative number the total is `0` —
/// "not yet computable", not an error.
///
/// ## Example
/// ```rust
/// use vulcan_core::pricing::standard_total;
///
/// assert_eq!(standard_total(750.0, 2.0), 1500.0);
/// assert_eq!(standard_total(-1.0, 2.0), 0.0);
/// assert_eq!(standard_total(f64::NAN, 2.0), 0.0);
/// ```
pub fn standard_total(rate: f64, quantity: f64) -> f64 {
    if !rate.is_finite() || !quantity.is_finite() || rate < 0.0 || quantity < 0.0 {
        return 0.0;
    }
    rate * quantity
}

// =============================================================================
// Volumetric Total
// =============================================================================

/// Weight-derived total for a custom-cut piece.
///
/// Derives density from the base product's reference geometry snapshot,
/// estimates the mass of the requested cut, and prices that mass at the
/// per-kg rate.
///
/// ## Guards
/// The total is `0` whenever:
/// - any of the eight numeric inputs fails to parse to a finite number,
/// - quantity, any requested dimension, or any reference figure is ≤ 0,
/// - the rate is negative,
/// - the reference volume is zero (divide-by-zero guard).
pub fn volumetric_total(
    quantity: f64,
    dims: &Dimensions,
    rate: f64,
    base: &GeometrySnapshot,
) -> f64 {
    if !quantity.is_finite() || !rate.is_finite() || quantity <= 0.0 || rate < 0.0 {
        return 0.0;
    }

    let parsed = [
        parse_decimal(&dims.length),
        parse_decimal(&dims.width),
        parse_decimal(&dims.thickness),
        parse_decimal(&base.weight),
        parse_decimal(&base.length),
        parse_decimal(&base.width),
        parse_decimal(&base.thickness),
    ];
    let [length, width, thickness, base_weight, base_length, base_width, base_thickness] =
        match parsed {
            [Some(a), Some(b), Some(c), Some(d), Some(e), Some(f), Some(g)] => {
                [a, b, c, d, e, f, g]
            }
            _ => return 0.0,
        };

    if [
        length,
        width,
        thickness,
        base_weight,
        base_length,
        base_width,
        base_thickness,
    ]
    .iter()
    .any(|n| *n <= 0.0)
    {
        return 0.0;
    }

    let base_volume = base_length * base_width * base_thickness;
    if base_volume == 0.0 {
        return 0.0;
    }

    let density = base_weight / base_volume;
    let custom_volume = length * width * thickness;
    let estimated_weight = custom_volume * density;

    round2(estimated_weight * rate * quantity)
}

// =============================================================================
// Effective Rate
// =============================================================================

/// The rate actually used for pricing.
///
/// A non-empty, parsable user override wins; otherwise the catalog default
/// parsed as a number; otherwise `0`.
///
/// ## Example
/// ```rust
/// use vulcan_core::pricing::resolve_effective_rate;
///
/// assert_eq!(resolve_effective_rate(Some("550"), "500"), 550.0);
/// assert_eq!(resolve_effective_rate(Some("  "), "500"), 500.0);
/// assert_eq!(resolve_effective_rate(None, "garbage"), 0.0);
/// ```
pub fn resolve_effective_rate(user_override: Option<&str>, catalog_default: &str) -> f64 {
    if let Some(value) = user_override {
        if !value.trim().is_empty() {
            if let Some(rate) = parse_decimal(value) {
                return rate;
            }
        }
    }
    parse_decimal(catalog_default).unwrap_or(0.0)
}

// =============================================================================
// Rate Bounds
// =============================================================================

/// Result of checking a rate against its catalog cost bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RateBoundCheck {
    /// Rate is below the minimum cost; blocks submission.
    pub invalid: bool,
    /// Rate is above the maximum cost; advisory only, never blocks.
    pub warning: bool,
}

/// Checks a rate against the min/max cost snapshot.
///
/// Bounds of `0` mean "unbounded" and never trigger.
pub fn validate_rate_bounds(rate: f64, min_cost: f64, max_cost: f64) -> RateBoundCheck {
    RateBoundCheck {
        invalid: min_cost > 0.0 && rate < min_cost,
        warning: max_cost > 0.0 && rate > max_cost,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_base() -> GeometrySnapshot {
        GeometrySnapshot {
            weight: "120".to_string(),
            length: "48".to_string(),
            width: "26".to_string(),
            thickness: "1".to_string(),
        }
    }

    #[test]
    fn test_standard_total() {
        assert_eq!(standard_total(500.0, 2.0), 1000.0);
        assert_eq!(standard_total(0.0, 5.0), 0.0);
    }

    #[test]
    fn test_standard_total_rejects_bad_input() {
        assert_eq!(standard_total(f64::NAN, 2.0), 0.0);
        assert_eq!(standard_total(500.0, f64::INFINITY), 0.0);
        assert_eq!(standard_total(-500.0, 2.0), 0.0);
        assert_eq!(standard_total(500.0, -2.0), 0.0);
    }

    #[test]
    fn test_volumetric_total_reference_scenario() {
        // density = 120 / (48*26*1); custom volume = 24*13*1 = 312;
        // estimated weight = 30 kg; total = 30 * 500 * 2 = 30000.00
        let dims = Dimensions::new("24", "13", "1");
        let total = volumetric_total(2.0, &dims, 500.0, &reference_base());
        assert_eq!(total, 30000.0);
    }

    #[test]
    fn test_volumetric_total_proportional_to_quantity_and_rate() {
        let dims = Dimensions::new("24", "13", "1");
        let base = reference_base();
        let one = volumetric_total(1.0, &dims, 500.0, &base);
        let two = volumetric_total(2.0, &dims, 500.0, &base);
        assert!((two - one * 2.0).abs() < 1e-9);

        let double_rate = volumetric_total(1.0, &dims, 1000.0, &base);
        assert!((double_rate - one * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_volumetric_total_zero_base_volume_guard() {
        let dims = Dimensions::new("24", "13", "1");
        let mut base = reference_base();
        base.thickness = "0".to_string();
        assert_eq!(volumetric_total(2.0, &dims, 500.0, &base), 0.0);
    }

    #[test]
    fn test_volumetric_total_unparsable_input() {
        let base = reference_base();
        let dims = Dimensions::new("24", "abc", "1");
        assert_eq!(volumetric_total(2.0, &dims, 500.0, &base), 0.0);

        let dims = Dimensions::new("24", "", "1");
        assert_eq!(volumetric_total(2.0, &dims, 500.0, &base), 0.0);
    }

    #[test]
    fn test_volumetric_total_non_positive_inputs() {
        let base = reference_base();
        let dims = Dimensions::new("24", "13", "1");
        assert_eq!(volumetric_total(0.0, &dims, 500.0, &base), 0.0);
        assert_eq!(volumetric_total(-1.0, &dims, 500.0, &base), 0.0);

        let dims = Dimensions::new("-24", "13", "1");
        assert_eq!(volumetric_total(2.0, &dims, 500.0, &base), 0.0);
    }

    #[test]
    fn test_volumetric_total_zero_rate_allowed() {
        // A rate of exactly zero is "not priced yet", not invalid.
        let dims = Dimensions::new("24", "13", "1");
        assert_eq!(volumetric_total(2.0, &dims, 0.0, &reference_base()), 0.0);
    }

    #[test]
    fn test_volumetric_total_rounds_to_currency() {
        // density = 10 / 1000 = 0.01; weight = 7*7*7 * 0.01 = 3.43;
        // 3.43 * 33.33 = 114.3219 → 114.32
        let base = GeometrySnapshot {
            weight: "10".to_string(),
            length: "10".to_string(),
            width: "10".to_string(),
            thickness: "10".to_string(),
        };
        let dims = Dimensions::new("7", "7", "7");
        assert_eq!(volumetric_total(1.0, &dims, 33.33, &base), 114.32);
    }

    #[test]
    fn test_resolve_effective_rate() {
        assert_eq!(resolve_effective_rate(Some("550"), "500"), 550.0);
        assert_eq!(resolve_effective_rate(Some(""), "500"), 500.0);
        assert_eq!(resolve_effective_rate(Some("abc"), "500"), 500.0);
        assert_eq!(resolve_effective_rate(None, "500"), 500.0);
        assert_eq!(resolve_effective_rate(None, ""), 0.0);
    }

    #[test]
    fn test_validate_rate_bounds() {
        // rate 40 with min 50 blocks submission
        let check = validate_rate_bounds(40.0, 50.0, 0.0);
        assert!(check.invalid);
        assert!(!check.warning);

        // rate above max is advisory only
        let check = validate_rate_bounds(900.0, 50.0, 800.0);
        assert!(!check.invalid);
        assert!(check.warning);

        // zero bounds never trigger
        let check = validate_rate_bounds(1.0, 0.0, 0.0);
        assert!(!check.invalid);
        assert!(!check.warning);
    }

    #[test]
    fn test_round2_half_up() {
        // 0.125 is exactly representable, so this pins the half-up rule.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(29999.999), 30000.0);
    }
}
