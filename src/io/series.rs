//! Read/write series JSON files.
//!
//! Series JSON is the "portable" representation of one load:
//! - the geographic code the scope resolved to
//! - the requested year range
//! - every fetched series with its ordered observations
//!
//! `wbt plot --series <file>` re-renders a saved load without refetching.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::pipeline::LoadOutput;
use crate::domain::{Series, YearRange};
use crate::error::AppError;

/// A saved load (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFile {
    pub tool: String,
    pub geo_code: String,
    pub years: YearRange,
    pub series: Vec<Series>,
}

/// Write a series JSON file.
pub fn write_series_json(
    path: &Path,
    output: &LoadOutput,
    years: &YearRange,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create series JSON '{}': {e}", path.display()),
        )
    })?;

    let doc = SeriesFile {
        tool: "wbt".to_string(),
        geo_code: output.geo_code.clone(),
        years: *years,
        series: output.series.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write series JSON: {e}")))?;

    Ok(())
}

/// Read a series JSON file.
pub fn read_series_json(path: &Path) -> Result<SeriesFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open series JSON '{}': {e}", path.display()),
        )
    })?;
    let doc: SeriesFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid series JSON: {e}")))?;
    Ok(doc)
}
