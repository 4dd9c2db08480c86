//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the bond inputs (`BondSpec`) and their derived per-period terms
//! - pricing outputs (`PriceBreakdown`, `CashFlow`, `PriceClass`)
//! - sweep/curve types (`PricePoint`, `YieldRange`, `CurveFile`)

pub mod types;

pub use types::*;
