//! Data acquisition and normalization.
//!
//! - World Bank API client + per-indicator fan-out (`worldbank`)
//! - pure response normalization (`normalize`)

pub mod normalize;
pub mod worldbank;

pub use normalize::*;
pub use worldbank::*;
