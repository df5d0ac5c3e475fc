//! Export observations to CSV.
//!
//! The export is flat (one row per observation) so it is easy to consume in
//! spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::catalog::Catalog;
use crate::domain::Series;
use crate::error::AppError;

/// Write every observation of every series to a CSV file.
pub fn write_observations_csv(
    path: &Path,
    series: &[Series],
    catalog: &Catalog,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "indicator_code,label,year,value")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for s in series {
        let label = csv_quote(&catalog.label_for(&s.indicator_code));
        for obs in &s.observations {
            writeln!(file, "{},{},{},{}", s.indicator_code, label, obs.year, obs.value)
                .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Labels may contain commas, so they are always quoted.
fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_doubles_embedded_quotes() {
        assert_eq!(csv_quote("plain"), "\"plain\"");
        assert_eq!(csv_quote("a \"b\" c"), "\"a \"\"b\"\" c\"");
    }
}
