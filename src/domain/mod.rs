//! Domain types used throughout the load pipeline.
//!
//! This module defines:
//!
//! - geographic scope resolution (`Scope`)
//! - the explicit load command (`LoadRequest`)
//! - normalized series types (`Observation`, `Series`)

pub mod types;

pub use types::*;
