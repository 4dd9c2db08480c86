//! Discounted cash-flow schedule for a single bond.
//!
//! The rows mirror exactly what `bond_price` sums, so the `present_value`
//! column adds up to the price.

use crate::domain::{BondSpec, CashFlow, CashFlowKind};
use crate::pricing::discount::{discount_factor, present_value};

/// Every coupon (periods `1..=⌊n⌋`) followed by the principal at period `n`.
pub fn cash_flow_schedule(spec: &BondSpec) -> Vec<CashFlow> {
    let coupon_periods = spec.coupon_periods();
    let coupon_payment = spec.coupon_payment();
    let ytm_periodic = spec.periodic_yield();

    let mut out = Vec::with_capacity(coupon_periods as usize + 1);
    for t in 1..=coupon_periods {
        let period = t as f64;
        out.push(CashFlow {
            kind: CashFlowKind::Coupon,
            period,
            amount: coupon_payment,
            discount_factor: discount_factor(ytm_periodic, period),
            present_value: present_value(coupon_payment, ytm_periodic, period),
        });
    }

    let periods = spec.periods();
    out.push(CashFlow {
        kind: CashFlowKind::Principal,
        period: periods,
        amount: spec.face_value,
        discount_factor: discount_factor(ytm_periodic, periods),
        present_value: present_value(spec.face_value, ytm_periodic, periods),
    });

    out
}

/// Sum of the schedule's present values.
pub fn schedule_total(rows: &[CashFlow]) -> f64 {
    let coupons: f64 = rows
        .iter()
        .filter(|r| r.kind == CashFlowKind::Coupon)
        .map(|r| r.present_value)
        .sum();
    let principal: f64 = rows
        .iter()
        .filter(|r| r.kind == CashFlowKind::Principal)
        .map(|r| r.present_value)
        .sum();
    coupons + principal
}
