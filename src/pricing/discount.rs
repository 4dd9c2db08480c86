//! Single cash-flow discounting.
//!
//! Everything else in the crate discounts through [`present_value`], so a coupon
//! and the principal of the same bond are always treated identically:
//!
//! `PV = C / (1 + r)^n`
//!
//! where `r` is the per-period rate and `n` the (possibly fractional) number of
//! compounding periods.

use crate::error::PricingError;

/// Present value of `cash_flow` received after `num_periods` periods at
/// `periodic_rate` per period.
///
/// Follows IEEE-754 on bad domains: a non-positive base with a fractional
/// exponent yields NaN, and `1 + periodic_rate == 0` yields an infinity or NaN.
pub fn present_value(cash_flow: f64, periodic_rate: f64, num_periods: f64) -> f64 {
    cash_flow / (1.0 + periodic_rate).powf(num_periods)
}

/// Discount factor `1 / (1 + r)^n`.
pub fn discount_factor(periodic_rate: f64, num_periods: f64) -> f64 {
    present_value(1.0, periodic_rate, num_periods)
}

/// Checked form of [`present_value`].
///
/// Returns [`PricingError::RateDomain`] when the growth base `1 + r` is zero,
/// or negative with a fractional exponent, and [`PricingError::NonFinite`]
/// for any other overflow/NaN.
pub fn try_present_value(
    cash_flow: f64,
    periodic_rate: f64,
    num_periods: f64,
) -> Result<f64, PricingError> {
    let base = 1.0 + periodic_rate;
    let fractional = num_periods.fract() != 0.0;
    if base == 0.0 || (base < 0.0 && fractional) {
        return Err(PricingError::RateDomain {
            periodic_rate,
            num_periods,
        });
    }

    let value = present_value(cash_flow, periodic_rate, num_periods);
    if !value.is_finite() {
        return Err(PricingError::NonFinite {
            context: "present_value",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn discounts_over_whole_periods() {
        assert_relative_eq!(present_value(1000.0, 0.02, 20.0), 672.971_333_1, epsilon = 1e-6);
        assert_relative_eq!(present_value(105.0, 0.05, 1.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_periods_returns_cash_flow() {
        assert_eq!(present_value(1000.0, 0.07, 0.0), 1000.0);
        assert_eq!(present_value(1000.0, -3.0, 0.0), 1000.0);
    }

    #[test]
    fn fractional_periods_interpolate() {
        let half = present_value(100.0, 0.04, 0.5);
        assert!(half < 100.0 && half > present_value(100.0, 0.04, 1.0));
        assert_relative_eq!(half, 100.0 / 1.04_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn negative_base_with_fractional_exponent_is_nan() {
        assert!(present_value(100.0, -1.5, 0.5).is_nan());
        // Integer exponents are well defined even for a negative base.
        assert_relative_eq!(present_value(100.0, -1.5, 2.0), 400.0, epsilon = 1e-12);
    }

    #[test]
    fn checked_form_reports_rate_domain() {
        assert_eq!(
            try_present_value(100.0, -1.5, 0.5),
            Err(PricingError::RateDomain {
                periodic_rate: -1.5,
                num_periods: 0.5,
            })
        );
        assert!(matches!(
            try_present_value(100.0, -1.0, 3.0),
            Err(PricingError::RateDomain { .. })
        ));
        assert_relative_eq!(try_present_value(100.0, -1.5, 2.0).unwrap(), 400.0, epsilon = 1e-12);
    }

    #[test]
    fn checked_form_reports_overflow() {
        assert!(matches!(
            try_present_value(f64::MAX, -0.999_999, 1e6),
            Err(PricingError::NonFinite { .. })
        ));
    }

    #[test]
    fn discount_factor_matches_unit_cash_flow() {
        assert_eq!(discount_factor(0.03, 4.0), present_value(1.0, 0.03, 4.0));
    }
}
