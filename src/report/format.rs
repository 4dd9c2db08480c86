//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pricing code stays clean and testable
//! - currency rounding only ever happens at the display boundary

use crate::domain::{BondSpec, CashFlow, PriceBreakdown, PriceClass, PricePoint};

/// `$1,081.76` style currency string (two decimals, thousands separators).
///
/// Non-finite values are shown as-is (`NaN`, `inf`) rather than hidden.
pub fn format_currency(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }

    let cents = format!("{:.2}", v.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = cents.chars().all(|c| c == '0' || c == '.');
    let sign = if v < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Fraction as a percentage, e.g. `0.045` -> `4.50%`.
pub fn format_percent(v: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, v * 100.0)
}

/// Human-readable payment frequency.
pub fn frequency_label(frequency: u32) -> String {
    match frequency {
        1 => "annual".to_string(),
        2 => "semi-annual".to_string(),
        4 => "quarterly".to_string(),
        12 => "monthly".to_string(),
        n => format!("{n}x per year"),
    }
}

/// The headline line, e.g. `Bond Price: $1,081.76`.
pub fn format_price_line(price: f64) -> String {
    format!("Bond Price: {}", format_currency(price))
}

/// Inputs, the per-period terms derived from them, and the priced result.
pub fn format_price_summary(spec: &BondSpec, breakdown: &PriceBreakdown) -> String {
    let mut out = String::new();

    out.push_str("=== bondpx - Fixed-Coupon Bond Price ===\n");
    out.push_str(&format!("Face value : {}\n", format_currency(spec.face_value)));
    out.push_str(&format!("Coupon     : {}\n", format_percent(spec.coupon_rate, 3)));
    out.push_str(&format!("Maturity   : {}y\n", spec.years_to_maturity));
    out.push_str(&format!("YTM        : {}\n", format_percent(spec.yield_to_maturity, 3)));
    out.push_str(&format!(
        "Frequency  : {} ({})\n",
        spec.frequency,
        frequency_label(spec.frequency)
    ));
    out.push_str(&format!(
        "Periods    : {} | coupon={} | periodic ytm={}\n",
        spec.periods(),
        format_currency(spec.coupon_payment()),
        format_percent(spec.periodic_yield(), 4),
    ));

    out.push('\n');
    out.push_str(&format!("PV coupons   : {}\n", format_currency(breakdown.coupon_pv)));
    out.push_str(&format!("PV principal : {}\n", format_currency(breakdown.face_value_pv)));
    out.push_str(&format_price_line(breakdown.price));
    out.push('\n');

    if breakdown.price.is_finite() {
        out.push_str(&format!(
            "Trades at {}\n",
            PriceClass::classify(breakdown.price, spec.face_value).display_name()
        ));
    }

    out
}

/// Per-flow schedule table.
pub fn format_schedule(rows: &[CashFlow]) -> String {
    let mut out = String::new();
    out.push_str(format!(
        "{:>8} {:<10} {:>14} {:>10} {:>14}\n",
        "period", "kind", "amount", "df", "pv"
    )
    .trim_end());
    out.push('\n');
    out.push_str(
        format!("{:->8} {:-<10} {:->14} {:->10} {:->14}\n", "", "", "", "", "").trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:>8} {:<10} {:>14} {:>10.6} {:>14}\n",
                fmt_period(r.period),
                r.kind.label(),
                format_currency(r.amount),
                r.discount_factor,
                format_currency(r.present_value),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Price/yield table with the move versus face value.
pub fn format_curve_table(points: &[PricePoint], face_value: f64) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>8} {:>14} {:>14}\n", "ytm", "price", "vs face").trim_end());
    out.push('\n');
    out.push_str(format!("{:->8} {:->14} {:->14}\n", "", "", "").trim_end());
    out.push('\n');

    for p in points {
        out.push_str(
            format!(
                "{:>8} {:>14} {:>14}\n",
                format_percent(p.yield_to_maturity, 2),
                format_currency(p.price),
                format_currency(p.price - face_value),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_period(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{p:.0}")
    } else {
        format!("{p:.3}")
    }
}
