//! Input/output helpers.
//!
//! - curve CSV exports (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
