//! `bond-pricer` library crate.
//!
//! Fixed-coupon bond pricing from yield: a single cash-flow discounting
//! primitive (`pricing::present_value`) and a bond pricer built on it
//! (`pricing::bond_price`).
//!
//! The binary (`bondpx`) is a thin wrapper around this library so that:
//!
//! - the pricing core stays pure and testable without spawning processes
//! - printing, charting and exports never leak into the pricing functions

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod pricing;
pub mod report;
pub mod sweep;
pub mod tui;

pub use domain::{BondSpec, DEFAULT_FREQUENCY};
pub use error::PricingError;
pub use pricing::{bond_price, present_value};
