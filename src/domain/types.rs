//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during pricing and sweeps
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coupon payments per year when the caller does not say otherwise (semi-annual).
pub const DEFAULT_FREQUENCY: u32 = 2;

/// Inputs of a fixed-coupon bond, all annualized.
///
/// No field is validated on construction; see [`BondSpec::validate`] for the
/// optional strict check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Principal repaid at maturity.
    pub face_value: f64,
    /// Annual coupon rate as a fraction of face value (0.05 = 5%).
    pub coupon_rate: f64,
    /// Time to maturity in years (may be fractional).
    pub years_to_maturity: f64,
    /// Annual yield to maturity as a fraction.
    pub yield_to_maturity: f64,
    /// Coupon payments per year.
    pub frequency: u32,
}

impl BondSpec {
    /// Build a spec paying semi-annual coupons.
    pub fn new(face_value: f64, coupon_rate: f64, years_to_maturity: f64, yield_to_maturity: f64) -> Self {
        Self {
            face_value,
            coupon_rate,
            years_to_maturity,
            yield_to_maturity,
            frequency: DEFAULT_FREQUENCY,
        }
    }

    pub fn with_frequency(self, frequency: u32) -> Self {
        Self { frequency, ..self }
    }

    /// Same bond, different yield.
    pub fn with_yield(self, yield_to_maturity: f64) -> Self {
        Self {
            yield_to_maturity,
            ..self
        }
    }

    /// Total number of periods, `years × frequency` (may be fractional).
    pub fn periods(&self) -> f64 {
        self.years_to_maturity * f64::from(self.frequency)
    }

    /// Number of coupons actually paid: `periods()` truncated toward zero.
    pub fn coupon_periods(&self) -> u64 {
        let periods = self.periods().trunc();
        if periods.is_nan() || periods < 1.0 {
            0
        } else {
            // `as` saturates for values beyond u64::MAX.
            periods as u64
        }
    }

    /// `true` when the principal is discounted over a different (fractional)
    /// period count than the last coupon.
    pub fn is_fractional_schedule(&self) -> bool {
        let periods = self.periods();
        periods.is_finite() && periods.fract() != 0.0
    }

    /// Fixed coupon paid each period.
    pub fn coupon_payment(&self) -> f64 {
        self.face_value * self.coupon_rate / f64::from(self.frequency)
    }

    /// Per-period discount rate.
    pub fn periodic_yield(&self) -> f64 {
        self.yield_to_maturity / f64::from(self.frequency)
    }
}

/// Whether a cash flow is a coupon or the principal repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowKind {
    Coupon,
    Principal,
}

impl CashFlowKind {
    pub fn label(self) -> &'static str {
        match self {
            CashFlowKind::Coupon => "coupon",
            CashFlowKind::Principal => "principal",
        }
    }
}

/// One row of a bond's discounted cash-flow schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub kind: CashFlowKind,
    /// Period index at which the flow is received (principal may be fractional).
    pub period: f64,
    pub amount: f64,
    pub discount_factor: f64,
    pub present_value: f64,
}

/// Price split into its coupon and principal legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub coupon_pv: f64,
    pub face_value_pv: f64,
    pub price: f64,
}

/// Price relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceClass {
    Premium,
    Par,
    Discount,
}

impl PriceClass {
    /// Relative tolerance within which a price counts as par.
    pub const PAR_TOLERANCE: f64 = 1e-9;

    pub fn classify(price: f64, face_value: f64) -> Self {
        let tol = Self::PAR_TOLERANCE * face_value.abs().max(1.0);
        if (price - face_value).abs() <= tol {
            PriceClass::Par
        } else if price > face_value {
            PriceClass::Premium
        } else {
            PriceClass::Discount
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PriceClass::Premium => "premium",
            PriceClass::Par => "par",
            PriceClass::Discount => "discount",
        }
    }
}

/// A single `(yield, price)` observation of the price/yield curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub yield_to_maturity: f64,
    pub price: f64,
}

/// Yield range swept by `bondpx curve` (inclusive endpoints).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldRange {
    pub ytm_min: f64,
    pub ytm_max: f64,
    pub steps: usize,
}

impl Default for YieldRange {
    fn default() -> Self {
        Self {
            ytm_min: 0.01,
            ytm_max: 0.10,
            steps: 50,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `BONDPX_*` env vars).
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub bond: BondSpec,
    /// Run `BondSpec::validate` before pricing.
    pub strict: bool,
    /// Yield sweep to run alongside the single price (`None` skips it).
    pub range: Option<YieldRange>,

    pub schedule: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved price/yield curve (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub bond: BondSpec,
    pub price: f64,
    pub range: YieldRange,
    pub points: Vec<PricePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_terms_follow_frequency() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        assert_eq!(spec.frequency, DEFAULT_FREQUENCY);
        assert_eq!(spec.periods(), 20.0);
        assert_eq!(spec.coupon_periods(), 20);
        assert_eq!(spec.coupon_payment(), 25.0);
        assert_eq!(spec.periodic_yield(), 0.02);
        assert!(!spec.is_fractional_schedule());
    }

    #[test]
    fn coupon_periods_truncate_toward_zero() {
        let spec = BondSpec::new(100.0, 0.05, 2.75, 0.04).with_frequency(2);
        assert_eq!(spec.periods(), 5.5);
        assert_eq!(spec.coupon_periods(), 5);
        assert!(spec.is_fractional_schedule());

        assert_eq!(BondSpec::new(100.0, 0.05, -1.5, 0.04).coupon_periods(), 0);
        assert_eq!(BondSpec::new(100.0, 0.05, f64::NAN, 0.04).coupon_periods(), 0);
    }

    #[test]
    fn classify_against_face() {
        assert_eq!(PriceClass::classify(1081.76, 1000.0), PriceClass::Premium);
        assert_eq!(PriceClass::classify(1000.0 + 1e-8, 1000.0), PriceClass::Par);
        assert_eq!(PriceClass::classify(950.0, 1000.0), PriceClass::Discount);
    }
}
