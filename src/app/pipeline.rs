//! Shared pricing pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> price -> (schedule) -> (yield sweep)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{BondSpec, CashFlow, PriceBreakdown, PriceClass, PricePoint, PricingConfig, YieldRange};
use crate::error::AppError;
use crate::pricing::{cash_flow_schedule, price_breakdown};
use crate::sweep::sweep;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub bond: BondSpec,
    pub breakdown: PriceBreakdown,
    /// `None` when the price is not finite.
    pub class: Option<PriceClass>,
    pub schedule: Vec<CashFlow>,
    pub curve: Vec<PricePoint>,
    /// Conditions worth telling the user about. The pipeline never logs these
    /// itself; each front-end reports them where it can.
    pub notes: Vec<RunNote>,
}

/// A non-fatal condition noticed while pricing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunNote {
    /// Coupons stop at the truncated period count, principal uses the full count.
    FractionalSchedule { periods: f64, coupons: u64 },
    NonFinitePrice { price: f64 },
}

impl RunNote {
    /// Emit the note as a structured warning.
    pub fn log(&self) {
        match *self {
            RunNote::FractionalSchedule { periods, coupons } => tracing::warn!(
                periods,
                coupons,
                "fractional period count: coupons stop at the truncated count, principal uses the full count"
            ),
            RunNote::NonFinitePrice { price } => tracing::warn!(price, "non-finite bond price"),
        }
    }
}

impl std::fmt::Display for RunNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunNote::FractionalSchedule { periods, coupons } => {
                write!(f, "{coupons} coupons, principal at period {periods}")
            }
            RunNote::NonFinitePrice { .. } => write!(f, "price is not finite"),
        }
    }
}

impl RunOutput {
    pub fn log_notes(&self) {
        for note in &self.notes {
            note.log();
        }
    }
}

/// Execute the pricing pipeline and return the computed outputs.
pub fn run_pricing(config: &PricingConfig) -> Result<RunOutput, AppError> {
    let bond = config.bond;
    if config.strict {
        bond.validate()?;
    }

    let mut notes = Vec::new();
    if bond.is_fractional_schedule() {
        notes.push(RunNote::FractionalSchedule {
            periods: bond.periods(),
            coupons: bond.coupon_periods(),
        });
    }

    let breakdown = price_breakdown(&bond);
    tracing::debug!(
        coupon_pv = breakdown.coupon_pv,
        face_value_pv = breakdown.face_value_pv,
        price = breakdown.price,
        "priced bond"
    );
    let class = if breakdown.price.is_finite() {
        Some(PriceClass::classify(breakdown.price, bond.face_value))
    } else {
        notes.push(RunNote::NonFinitePrice { price: breakdown.price });
        None
    };

    let schedule = if config.schedule {
        cash_flow_schedule(&bond)
    } else {
        Vec::new()
    };

    let curve = match &config.range {
        Some(range) => {
            check_range(range)?;
            let points = sweep(&bond, range);
            tracing::debug!(points = points.len(), "swept price/yield curve");
            points
        }
        None => Vec::new(),
    };

    Ok(RunOutput {
        bond,
        breakdown,
        class,
        schedule,
        curve,
        notes,
    })
}

fn check_range(range: &YieldRange) -> Result<(), AppError> {
    if range.steps == 0 {
        return Err(AppError::new(2, "Sweep needs at least one step."));
    }
    if !(range.ytm_min.is_finite() && range.ytm_max.is_finite() && range.ytm_max >= range.ytm_min) {
        return Err(AppError::new(2, "Invalid yield range for sweep."));
    }
    Ok(())
}
