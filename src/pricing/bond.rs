//! Fixed-coupon bond pricing from yield.
//!
//! The price is the sum of every discounted coupon plus the discounted
//! principal, all at the flat per-period yield `ytm / frequency`:
//!
//! `P = Σ_{t=1..⌊n⌋} C / (1 + y)^t + F / (1 + y)^n`,  `n = years × frequency`
//!
//! Note the asymmetry when `n` is fractional: coupons stop at `⌊n⌋` (truncated
//! toward zero) while the principal is discounted over the full `n`. This is
//! kept as-is so prices match existing figures for odd maturities.

use crate::domain::{BondSpec, PriceBreakdown};
use crate::error::PricingError;
use crate::pricing::discount::{present_value, try_present_value};

/// Price a bond from plain numeric inputs.
///
/// Nothing is validated. A yield at or below `-frequency` combined with a
/// fractional period count comes back as NaN, and `frequency = 0` divides by
/// zero inside the per-period terms.
pub fn bond_price(
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    yield_to_maturity: f64,
    frequency: u32,
) -> f64 {
    BondSpec {
        face_value,
        coupon_rate,
        years_to_maturity,
        yield_to_maturity,
        frequency,
    }
    .price()
}

/// Coupon leg, principal leg and their sum.
pub fn price_breakdown(spec: &BondSpec) -> PriceBreakdown {
    let periods = spec.periods();
    let coupon_payment = spec.coupon_payment();
    let ytm_periodic = spec.periodic_yield();

    let coupon_pv: f64 = (1..=spec.coupon_periods())
        .map(|t| present_value(coupon_payment, ytm_periodic, t as f64))
        .sum();
    let face_value_pv = present_value(spec.face_value, ytm_periodic, periods);

    PriceBreakdown {
        coupon_pv,
        face_value_pv,
        price: coupon_pv + face_value_pv,
    }
}

/// Checked pricing: validates the spec, then fails on the first cash flow
/// that cannot be discounted instead of returning NaN.
pub fn try_bond_price(spec: &BondSpec) -> Result<f64, PricingError> {
    spec.validate()?;

    let coupon_payment = spec.coupon_payment();
    let ytm_periodic = spec.periodic_yield();

    let mut coupon_pv = 0.0;
    for t in 1..=spec.coupon_periods() {
        coupon_pv += try_present_value(coupon_payment, ytm_periodic, t as f64)?;
    }
    let face_value_pv = try_present_value(spec.face_value, ytm_periodic, spec.periods())?;

    let price = coupon_pv + face_value_pv;
    if !price.is_finite() {
        return Err(PricingError::NonFinite { context: "bond_price" });
    }
    Ok(price)
}

impl BondSpec {
    /// Theoretical price at the spec's own yield.
    pub fn price(&self) -> f64 {
        price_breakdown(self).price
    }

    /// Price of the same bond at a different yield.
    pub fn price_at(&self, yield_to_maturity: f64) -> f64 {
        self.with_yield(yield_to_maturity).price()
    }

    /// Strict precondition check for callers that want one.
    ///
    /// The pricing functions themselves never call this.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.face_value.is_finite() && self.face_value > 0.0) {
            return Err(invalid("face_value", "must be finite and > 0"));
        }
        if !(self.coupon_rate.is_finite() && self.coupon_rate >= 0.0) {
            return Err(invalid("coupon_rate", "must be finite and >= 0"));
        }
        if !(self.years_to_maturity.is_finite() && self.years_to_maturity >= 0.0) {
            return Err(invalid("years_to_maturity", "must be finite and >= 0"));
        }
        if self.frequency == 0 {
            return Err(invalid("frequency", "must be >= 1"));
        }
        if !(self.yield_to_maturity.is_finite() && self.periodic_yield() > -1.0) {
            return Err(invalid(
                "yield_to_maturity",
                format!("must be finite and > -{}", self.frequency),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> PricingError {
    PricingError::InvalidInput {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ten_year_semi_annual_premium_bond() {
        let price = bond_price(1000.0, 0.05, 10.0, 0.04, 2);
        assert!((price - 1081.76).abs() < 0.01, "got {price}");
    }

    #[test]
    fn annual_single_period_par_bond() {
        let price = bond_price(1000.0, 0.05, 1.0, 0.05, 1);
        assert_relative_eq!(price, 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn breakdown_legs_sum_to_price() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        let b = price_breakdown(&spec);
        assert_relative_eq!(b.coupon_pv, 408.785_833_6, epsilon = 1e-6);
        assert_relative_eq!(b.face_value_pv, 672.971_333_1, epsilon = 1e-6);
        assert_eq!(b.price, b.coupon_pv + b.face_value_pv);
        assert_eq!(b.price, spec.price());
    }

    #[test]
    fn zero_maturity_is_face_value() {
        let spec = BondSpec::new(1000.0, 0.05, 0.0, 0.04);
        let b = price_breakdown(&spec);
        assert_eq!(b.coupon_pv, 0.0);
        assert_eq!(b.price, 1000.0);
    }

    #[test]
    fn fractional_periods_keep_principal_fractional() {
        // 2.75y semi-annual: 5 coupons, principal at 5.5 periods.
        let spec = BondSpec::new(100.0, 0.06, 2.75, 0.04);
        let y = 0.02;
        let coupons: f64 = (1..=5).map(|t| 3.0 / 1.02_f64.powi(t)).sum();
        let principal = 100.0 / (1.0_f64 + y).powf(5.5);
        assert_relative_eq!(spec.price(), coupons + principal, epsilon = 1e-10);
    }

    #[test]
    fn zero_frequency_is_not_rejected() {
        // Division by zero leaves no periods, so only the undiscounted principal remains.
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04).with_frequency(0);
        assert!(spec.coupon_payment().is_infinite());
        assert!(spec.periodic_yield().is_infinite());
        assert_eq!(spec.coupon_periods(), 0);
        assert_eq!(bond_price(1000.0, 0.05, 10.0, 0.04, 0), 1000.0);
    }

    #[test]
    fn negative_base_with_fractional_principal_is_nan() {
        // 1 + ytm / frequency = -2, principal discounted over 3.5 periods.
        assert!(bond_price(1000.0, 0.05, 3.5, -3.0, 1).is_nan());
    }

    #[test]
    fn price_at_reprices_only_the_yield() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        assert_eq!(spec.price_at(0.05), bond_price(1000.0, 0.05, 10.0, 0.05, 2));
        assert_relative_eq!(spec.price_at(0.05), 1000.0, max_relative = 1e-9);
    }

    #[test]
    fn checked_price_matches_plain_price() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        assert_relative_eq!(try_bond_price(&spec).unwrap(), spec.price(), max_relative = 1e-12);
    }

    #[test]
    fn checked_price_rejects_bad_inputs() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);

        let err = try_bond_price(&spec.with_frequency(0)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { field: "frequency", .. }));

        let err = try_bond_price(&BondSpec { face_value: -1.0, ..spec }).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { field: "face_value", .. }));

        let err = try_bond_price(&spec.with_yield(-2.0)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { field: "yield_to_maturity", .. }));
    }
}
