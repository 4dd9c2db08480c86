//! Public-API properties of the pricing core.

use approx::assert_relative_eq;
use bond_pricer::sweep::{linspace, price_yield_curve};
use bond_pricer::{bond_price, present_value, BondSpec};

const FREQUENCIES: [u32; 4] = [1, 2, 4, 12];

#[test]
fn repeated_calls_are_bit_identical() {
    let a = bond_price(1000.0, 0.0375, 7.25, 0.0412, 4);
    for _ in 0..10 {
        assert_eq!(bond_price(1000.0, 0.0375, 7.25, 0.0412, 4).to_bits(), a.to_bits());
    }
}

#[test]
fn zero_coupon_is_discounted_principal() {
    for &f in &FREQUENCIES {
        for &years in &[0.5, 1.0, 3.25, 10.0, 30.0] {
            for &ytm in &[-0.01, 0.0, 0.03, 0.12] {
                let price = bond_price(1000.0, 0.0, years, ytm, f);
                let expected = present_value(1000.0, ytm / f64::from(f), years * f64::from(f));
                assert_eq!(price, expected, "f={f} years={years} ytm={ytm}");
            }
        }
    }
}

#[test]
fn coupon_equal_to_yield_prices_at_par() {
    for &f in &FREQUENCIES {
        for &years in &[1.0, 2.0, 5.0, 10.0, 30.0] {
            for &rate in &[0.01, 0.04, 0.05, 0.085] {
                let price = bond_price(1000.0, rate, years, rate, f);
                assert_relative_eq!(price, 1000.0, max_relative = 1e-6);
            }
        }
    }
}

#[test]
fn price_strictly_decreases_with_yield() {
    for &f in &FREQUENCIES {
        // Periodic yield must stay above -1, i.e. ytm > -f.
        let lower = -f64::from(f) * 0.95;
        let spec = BondSpec::new(1000.0, 0.05, 10.0, 0.0).with_frequency(f);
        let yields = linspace(lower, 0.5, 200);
        let curve = price_yield_curve(&spec, &yields);
        for w in curve.windows(2) {
            assert!(
                w[1].price < w[0].price,
                "f={f}: price({}) = {} !< price({}) = {}",
                w[1].yield_to_maturity,
                w[1].price,
                w[0].yield_to_maturity,
                w[0].price
            );
        }
    }
}

#[test]
fn literal_scenarios() {
    assert!((bond_price(1000.0, 0.05, 10.0, 0.04, 2) - 1081.76).abs() <= 0.01);
    assert!((bond_price(1000.0, 0.05, 1.0, 0.05, 1) - 1000.0).abs() <= 0.005);
}

#[test]
fn zero_maturity_prices_at_face() {
    for &f in &FREQUENCIES {
        assert_eq!(bond_price(1000.0, 0.05, 0.0, 0.04, f), 1000.0);
    }
}

#[test]
fn fractional_period_count_truncates_coupons_only() {
    // 1.3y annual: one coupon at t=1, principal at t=1.3.
    let price = bond_price(100.0, 0.10, 1.3, 0.05, 1);
    let expected = 10.0 / 1.05 + 100.0 / 1.05_f64.powf(1.3);
    assert_relative_eq!(price, expected, epsilon = 1e-12);
}
