//! Shared load pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> fetch fan-out -> normalize -> aggregate
//!
//! The front-ends then focus on presentation (printing vs widgets).

use crate::data::worldbank::{RawRecord, WorldBankClient, fetch_series_batch};
use crate::domain::{LoadRequest, Series};
use crate::error::AppError;

/// The aggregated outputs of one load operation.
#[derive(Debug, Clone)]
pub struct LoadOutput {
    /// Geographic code the scope resolved to.
    pub geo_code: String,
    /// One series per requested indicator, in request order.
    pub series: Vec<Series>,
}

/// Execute a load against the live API.
pub fn run_load(client: &WorldBankClient, request: &LoadRequest) -> Result<LoadOutput, AppError> {
    let geo_code = request.validate()?;
    let series = client.fetch_all(&geo_code, &request.indicators, &request.years)?;
    Ok(LoadOutput { geo_code, series })
}

/// Execute a load with a caller-supplied per-indicator fetch.
///
/// Validation runs first; the fetch is never invoked for an invalid request.
pub fn run_load_with<F>(request: &LoadRequest, fetch: F) -> Result<LoadOutput, AppError>
where
    F: Fn(&str) -> Result<Vec<RawRecord>, AppError> + Send + Sync,
{
    let geo_code = request.validate()?;
    let series = fetch_series_batch(&request.indicators, fetch)?;
    Ok(LoadOutput { geo_code, series })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::catalog::Catalog;
    use crate::chart::build_datasets;
    use crate::domain::{Observation, Scope, YearRange};

    fn record(date: &str, value: Option<f64>) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            value,
        }
    }

    fn request(scope: Scope, indicators: &[&str]) -> LoadRequest {
        LoadRequest {
            scope,
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
            years: YearRange::new(2000, 2002),
        }
    }

    #[test]
    fn empty_selection_fails_before_any_fetch() {
        let calls = AtomicUsize::new(0);
        let result = run_load_with(&request(Scope::World, &[]), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        });

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unresolved_continent_fails_before_any_fetch() {
        let calls = AtomicUsize::new(0);
        let scope = Scope::Continent(String::new());
        let result = run_load_with(&request(scope, &["SP.POP.TOTL"]), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        });

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn world_load_drops_nulls_and_sorts() {
        let output = run_load_with(&request(Scope::World, &["SP.POP.TOTL"]), |_| {
            Ok(vec![
                record("2002", Some(120.0)),
                record("2001", None),
                record("2000", Some(100.0)),
            ])
        })
        .unwrap();

        assert_eq!(output.geo_code, "WLD");
        assert_eq!(output.series.len(), 1);
        assert_eq!(
            output.series[0].observations,
            vec![
                Observation { year: 2000, value: 100.0 },
                Observation { year: 2002, value: 120.0 },
            ]
        );
    }

    #[test]
    fn empty_and_populated_series_both_become_datasets() {
        let output = run_load_with(
            &request(Scope::World, &["SP.POP.TOTL", "NY.GDP.MKTP.CD"]),
            |code| {
                if code == "SP.POP.TOTL" {
                    Ok(Vec::new())
                } else {
                    Ok(vec![record("2000", Some(1.0)), record("2001", Some(2.0))])
                }
            },
        )
        .unwrap();

        let catalog = Catalog::builtin();
        let datasets = build_datasets(&output.series, &catalog);

        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].label, "Population");
        assert!(datasets[0].points.is_empty());
        assert_eq!(datasets[1].label, "GDP (current US$)");
        assert_eq!(datasets[1].points.len(), 2);
        assert_ne!(datasets[0].color, datasets[1].color);
    }

    #[test]
    fn one_failed_fetch_fails_the_load_with_no_partial_output() {
        let result = run_load_with(
            &request(Scope::Country("USA".to_string()), &["A", "B"]),
            |code| {
                if code == "B" {
                    Err(AppError::fetch("connection reset"))
                } else {
                    Ok(vec![record("2000", Some(1.0))])
                }
            },
        );

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
