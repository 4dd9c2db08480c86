//! Present-value pricing core.
//!
//! Pure functions only: no I/O, no logging, no shared state. Everything here is
//! safe to call from many threads at once (see `sweep`).

pub mod bond;
pub mod discount;
pub mod schedule;

pub use bond::*;
pub use discount::*;
pub use schedule::*;
