//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a load
//! - exported to JSON/CSV
//! - reloaded later for plotting

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Aggregate code the API uses for world-level series.
pub const WORLD_GEO_CODE: &str = "WLD";

/// A named statistical series identifier (e.g. population, GDP).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub code: String,
    pub label: String,
}

/// Geographic aggregation level for a request.
///
/// Exactly one scope is active at a time. `Continent` and `Country` carry
/// the chosen aggregate/ISO code; an empty code is invalid input and is
/// rejected at validation time rather than sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    World,
    Continent(String),
    Country(String),
}

impl Scope {
    /// Resolve the scope to the geographic code embedded in request URLs.
    pub fn resolve(&self) -> Result<String, AppError> {
        match self {
            Scope::World => Ok(WORLD_GEO_CODE.to_string()),
            Scope::Continent(code) => resolve_code(code, "continent"),
            Scope::Country(code) => resolve_code(code, "country"),
        }
    }

    /// Short label for headers and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Scope::World => "World",
            Scope::Continent(_) => "Continent",
            Scope::Country(_) => "Country",
        }
    }
}

fn resolve_code(code: &str, kind: &str) -> Result<String, AppError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("Select a {kind} first.")));
    }
    Ok(trimmed.to_string())
}

/// Inclusive year range, rendered as the API's `start:end` date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// The value of the `date` query parameter.
    pub fn date_param(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.start > self.end {
            return Err(AppError::validation(format!(
                "Start year {} is after end year {}.",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// A single (year, value) data point for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub value: f64,
}

/// The ordered observations for one indicator over the requested range.
///
/// Invariant: observations are sorted ascending by year (stable, so equal
/// years keep response order). An empty series is valid and is still charted
/// as an empty line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub indicator_code: String,
    pub observations: Vec<Observation>,
}

/// The explicit "load" command: everything one fetch cycle needs.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub scope: Scope,
    pub indicators: Vec<String>,
    pub years: YearRange,
}

impl LoadRequest {
    /// Validate user input and resolve the geographic code.
    ///
    /// Runs before any network activity; every failure here is a validation
    /// error (exit code 2).
    pub fn validate(&self) -> Result<String, AppError> {
        let geo_code = self.scope.resolve()?;
        if self.indicators.is_empty() {
            return Err(AppError::validation("Select at least one indicator."));
        }
        self.years.validate()?;
        Ok(geo_code)
    }
}
