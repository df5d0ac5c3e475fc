//! World Bank API integration.
//!
//! One request per indicator: `/v2/country/{geo}/indicator/{code}` with
//! `format=json`, a `start:end` date filter, and a fixed page size. The API
//! answers with a two-element array: `[metadata, records]`. Element 1 is
//! null (or absent) when nothing matched; that is an empty result set, not
//! an error.

use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::data::normalize::normalize_records;
use crate::domain::{Series, YearRange};
use crate::error::AppError;

const BASE_URL: &str = "https://api.worldbank.org/v2";

/// Fixed page size. Matches beyond this many records truncate silently;
/// there is no pagination.
const PER_PAGE: usize = 100;

/// A raw per-year record as returned by the API.
///
/// `value` is null for years with no data. `date` is a year rendered as a
/// string; records with a missing or non-numeric date are dropped during
/// normalization. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

pub struct WorldBankClient {
    client: Client,
}

impl WorldBankClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch and normalize every requested indicator.
    ///
    /// Fan-out: one concurrent request per indicator. Fan-in: the collect
    /// joins all of them and short-circuits on the first failure, so no
    /// partial result set escapes.
    pub fn fetch_all(
        &self,
        geo_code: &str,
        indicators: &[String],
        years: &YearRange,
    ) -> Result<Vec<Series>, AppError> {
        fetch_series_batch(indicators, |code| self.fetch_records(geo_code, code, years))
    }

    /// Fetch the raw records for a single indicator.
    fn fetch_records(
        &self,
        geo_code: &str,
        indicator: &str,
        years: &YearRange,
    ) -> Result<Vec<RawRecord>, AppError> {
        let url = format!("{BASE_URL}/country/{geo_code}/indicator/{indicator}");
        let date = years.date_param();
        let per_page = PER_PAGE.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("date", date.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .map_err(|e| AppError::fetch(format!("Request for {indicator} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "Request for {indicator} failed with status {}.",
                resp.status()
            )));
        }

        let body: Value = resp
            .json()
            .map_err(|e| AppError::fetch(format!("Failed to parse response for {indicator}: {e}")))?;

        parse_records(&body, indicator)
    }
}

impl Default for WorldBankClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the record array from a `[metadata, records]` response body.
///
/// Element 1 missing or null means an empty result set. Element 1 present
/// but not an array of records is a malformed response.
pub fn parse_records(body: &Value, indicator: &str) -> Result<Vec<RawRecord>, AppError> {
    let Some(records) = body.get(1) else {
        return Ok(Vec::new());
    };
    if records.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(records.clone())
        .map_err(|e| AppError::fetch(format!("Unexpected response shape for {indicator}: {e}")))
}

/// Fan-out over indicator codes with a caller-supplied per-indicator fetch.
///
/// Split out from the client so the join semantics are testable without a
/// network: output order matches input order, and the first failure fails
/// the whole batch.
pub fn fetch_series_batch<F>(indicators: &[String], fetch: F) -> Result<Vec<Series>, AppError>
where
    F: Fn(&str) -> Result<Vec<RawRecord>, AppError> + Send + Sync,
{
    indicators
        .par_iter()
        .map(|code| {
            let records = fetch(code.as_str())?;
            Ok(Series {
                indicator_code: code.clone(),
                observations: normalize_records(&records),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_records_element_is_an_empty_result() {
        let body = json!([{"page": 1, "total": 0}, null]);
        let records = parse_records(&body, "SP.POP.TOTL").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_records_element_is_an_empty_result() {
        // The API answers invalid queries with a one-element array carrying
        // only a message object.
        let body = json!([{"message": [{"id": "120"}]}]);
        let records = parse_records(&body, "SP.POP.TOTL").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn records_parse_with_unknown_fields_ignored() {
        let body = json!([
            {"page": 1},
            [
                {"date": "2001", "value": 2.5, "indicator": {"id": "X"}, "country": {"id": "WLD"}},
                {"date": "2000", "value": null, "decimal": 0}
            ]
        ]);
        let records = parse_records(&body, "X").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.as_deref(), Some("2001"));
        assert_eq!(records[0].value, Some(2.5));
        assert_eq!(records[1].value, None);
    }

    #[test]
    fn non_array_records_element_is_a_fetch_error() {
        let body = json!([{"page": 1}, 42]);
        let err = parse_records(&body, "X").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn batch_preserves_input_order() {
        let codes = vec!["B".to_string(), "A".to_string()];
        let series = fetch_series_batch(&codes, |code| {
            Ok(vec![RawRecord {
                date: Some("2000".to_string()),
                value: Some(if code == "B" { 1.0 } else { 2.0 }),
            }])
        })
        .unwrap();

        assert_eq!(series[0].indicator_code, "B");
        assert_eq!(series[1].indicator_code, "A");
        assert_eq!(series[0].observations[0].value, 1.0);
    }

    #[test]
    fn one_failure_fails_the_whole_batch() {
        let codes: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let result = fetch_series_batch(&codes, |code| {
            if code == "B" {
                Err(AppError::fetch("boom"))
            } else {
                Ok(Vec::new())
            }
        });

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
