//! Export price/yield points to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{BondSpec, PriceClass, PricePoint};
use crate::error::AppError;

/// Write the swept curve to a CSV file.
pub fn write_results_csv(path: &Path, points: &[PricePoint], bond: &BondSpec) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, points, bond)?;
    tracing::info!(path = %path.display(), rows = points.len(), "wrote curve CSV");
    Ok(())
}

fn write_results<W: Write>(mut out: W, points: &[PricePoint], bond: &BondSpec) -> Result<(), AppError> {
    writeln!(
        out,
        "ytm,price,price_minus_face,class,face_value,coupon_rate,years_to_maturity,frequency"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        let class = if p.price.is_finite() {
            PriceClass::classify(p.price, bond.face_value).display_name()
        } else {
            ""
        };
        writeln!(
            out,
            "{:.10},{:.6},{:.6},{},{},{},{},{}",
            p.yield_to_maturity,
            p.price,
            p.price - bond.face_value,
            class,
            bond.face_value,
            bond.coupon_rate,
            bond.years_to_maturity,
            bond.frequency,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_carry_bond_terms() {
        let bond = BondSpec::new(1000.0, 0.05, 10.0, 0.04);
        let points = [
            PricePoint { yield_to_maturity: 0.04, price: 1081.757_166_7 },
            PricePoint { yield_to_maturity: 0.05, price: 1000.0 },
        ];

        let mut buf = Vec::new();
        write_results(&mut buf, &points, &bond).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ytm,price,"));
        assert_eq!(lines[1], "0.0400000000,1081.757167,81.757167,premium,1000,0.05,10,2");
        assert_eq!(lines[2], "0.0500000000,1000.000000,0.000000,par,1000,0.05,10,2");
    }
}
