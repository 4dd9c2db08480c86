//! Reporting utilities: currency/percent formatting, price summaries and tables.

pub mod format;

pub use format::*;
