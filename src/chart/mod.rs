//! Chart data preparation.
//!
//! Widgets and plot renderers stay data-driven: datasets (label, color,
//! points) are built here, outside any render call, so the prep is easy to
//! test separately from drawing.

pub mod dataset;

pub use dataset::*;
