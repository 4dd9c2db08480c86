//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a price/yield sweep:
//! - the bond inputs and its price at the quoted yield
//! - the swept yield range
//! - the ordered `(yield, price)` points for quick re-plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{BondSpec, CurveFile, PricePoint, YieldRange};
use crate::error::AppError;

/// Assemble a curve file stamped with the current time.
pub fn build_curve_file(bond: &BondSpec, price: f64, range: &YieldRange, points: &[PricePoint]) -> CurveFile {
    CurveFile {
        tool: "bondpx".to_string(),
        generated_at: Utc::now(),
        bond: *bond,
        price,
        range: *range,
        points: points.to_vec(),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    tracing::info!(path = %path.display(), points = curve.points.len(), "wrote curve JSON");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    tracing::debug!(path = %path.display(), points = curve.points.len(), "read curve JSON");
    Ok(curve)
}
