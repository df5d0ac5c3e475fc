//! Formatted terminal output for load results.
//!
//! We keep formatting code in one place so:
//! - the fetch/normalize code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::LoadOutput;
use crate::catalog::Catalog;
use crate::domain::LoadRequest;
use crate::report::{SeriesSummary, summarize};

/// Format the full load summary (scope + years + per-series table).
pub fn format_load_summary(
    request: &LoadRequest,
    output: &LoadOutput,
    catalog: &Catalog,
) -> String {
    let mut out = String::new();

    out.push_str("=== wbt - World Bank indicator series ===\n");
    out.push_str(&format!(
        "Scope: {} ({})\n",
        request.scope.display_name(),
        output.geo_code
    ));
    out.push_str(&format!(
        "Years: {}-{}\n",
        request.years.start, request.years.end
    ));
    out.push_str(&format!("Series: {}\n\n", output.series.len()));

    out.push_str(&format_series_table(&summarize(&output.series, catalog)));

    out
}

/// Format the per-series summary table.
pub fn format_series_table(rows: &[SeriesSummary]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<20} {:<38} {:>5} {:>11} {:>12} {:>12}\n",
            "code", "label", "n", "years", "first", "last"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<20} {:-<38} {:-<5} {:-<11} {:-<12} {:-<12}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for row in rows {
        let years = row
            .year_span
            .map(|(a, b)| format!("{a}-{b}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{:<20} {:<38} {:>5} {:>11} {:>12} {:>12}\n",
                truncate(&row.indicator_code, 20),
                truncate(&row.label, 38),
                row.n_obs,
                years,
                fmt_value(row.first_value),
                fmt_value(row.last_value),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_value(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    if v.abs() >= 1e6 {
        format!("{v:.3e}")
    } else {
        format!("{v:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
