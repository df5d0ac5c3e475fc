//! Input/output helpers.
//!
//! - per-observation CSV export (`export`)
//! - series JSON read/write (`series`)

pub mod export;
pub mod series;

pub use export::*;
pub use series::*;
