//! Reporting utilities: per-series summaries and formatted terminal output.

pub mod format;

pub use format::*;

use crate::catalog::Catalog;
use crate::domain::Series;

/// Summary of one fetched series, for terminal tables.
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    pub indicator_code: String,
    pub label: String,
    pub n_obs: usize,
    /// First and last observation years; `None` for an empty series.
    pub year_span: Option<(i32, i32)>,
    pub first_value: Option<f64>,
    pub last_value: Option<f64>,
}

/// Compute summaries for each series, preserving order.
pub fn summarize(series: &[Series], catalog: &Catalog) -> Vec<SeriesSummary> {
    series
        .iter()
        .map(|s| {
            let first = s.observations.first();
            let last = s.observations.last();
            SeriesSummary {
                indicator_code: s.indicator_code.clone(),
                label: catalog.label_for(&s.indicator_code),
                n_obs: s.observations.len(),
                year_span: first.zip(last).map(|(f, l)| (f.year, l.year)),
                first_value: first.map(|obs| obs.value),
                last_value: last.map(|obs| obs.value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    #[test]
    fn summarize_reports_span_and_endpoints() {
        let catalog = Catalog::builtin();
        let series = vec![Series {
            indicator_code: "SP.POP.TOTL".to_string(),
            observations: vec![
                Observation { year: 2000, value: 100.0 },
                Observation { year: 2005, value: 120.0 },
            ],
        }];

        let summaries = summarize(&series, &catalog);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].label, "Population");
        assert_eq!(summaries[0].n_obs, 2);
        assert_eq!(summaries[0].year_span, Some((2000, 2005)));
        assert_eq!(summaries[0].first_value, Some(100.0));
        assert_eq!(summaries[0].last_value, Some(120.0));
    }

    #[test]
    fn empty_series_summarizes_without_a_span() {
        let catalog = Catalog::builtin();
        let series = vec![Series {
            indicator_code: "SP.POP.TOTL".to_string(),
            observations: Vec::new(),
        }];

        let summary = &summarize(&series, &catalog)[0];

        assert_eq!(summary.n_obs, 0);
        assert_eq!(summary.year_span, None);
        assert_eq!(summary.first_value, None);
    }
}
