//! Price/yield sweeps.
//!
//! The pricer is re-run once per yield with every other input held fixed. Each
//! evaluation is independent, so the grid is priced in parallel; rayon's
//! indexed `collect` keeps the output in the same order as the input yields.

use rayon::prelude::*;

use crate::domain::{BondSpec, PricePoint, YieldRange};

/// `n` evenly spaced values from `start` to `end`, both included.
///
/// `n = 0` gives an empty vector and `n = 1` gives `[start]`. The last value is
/// pinned to `end` so rounding in the step never drops the upper bound.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Price `spec` at each yield in `yields`.
pub fn price_yield_curve(spec: &BondSpec, yields: &[f64]) -> Vec<PricePoint> {
    yields
        .par_iter()
        .map(|&y| PricePoint {
            yield_to_maturity: y,
            price: spec.price_at(y),
        })
        .collect()
}

/// Price `spec` over an inclusive yield range.
pub fn sweep(spec: &BondSpec, range: &YieldRange) -> Vec<PricePoint> {
    let yields = linspace(range.ytm_min, range.ytm_max, range.steps);
    price_yield_curve(spec, &yields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints_and_spacing() {
        let v = linspace(0.01, 0.1, 50);
        assert_eq!(v.len(), 50);
        assert_eq!(v[0], 0.01);
        assert_eq!(v[49], 0.1);
        let step = v[1] - v[0];
        assert!((step - 0.09 / 49.0).abs() < 1e-15);

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn parallel_sweep_matches_sequential_order() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        let curve = sweep(&spec, &YieldRange::default());
        assert_eq!(curve.len(), 50);

        let yields = linspace(0.01, 0.1, 50);
        for (p, &y) in curve.iter().zip(&yields) {
            assert_eq!(p.yield_to_maturity, y);
            assert_eq!(p.price, spec.price_at(y));
        }
    }

    #[test]
    fn sweep_prices_fall_as_yield_rises() {
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        let curve = sweep(&spec, &YieldRange::default());
        assert!(curve.windows(2).all(|w| w[1].price < w[0].price));
        // 5% coupon crosses par inside the 1%..10% window.
        assert!(curve.first().is_some_and(|p| p.price > 1000.0));
        assert!(curve.last().is_some_and(|p| p.price < 1000.0));
    }
}
