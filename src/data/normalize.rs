//! Response normalization: raw per-year records to ordered observations.
//!
//! Pure transformation, no I/O. Steps, in order:
//!
//! 1. drop records whose value is null
//! 2. parse the date field as an integer year; records whose date is missing
//!    or does not parse are dropped as well
//! 3. stable sort ascending by year
//!
//! Values are carried unchanged: no unit conversion, no rounding.

use crate::data::worldbank::RawRecord;
use crate::domain::Observation;

/// Normalize one indicator's raw records into ordered observations.
pub fn normalize_records(records: &[RawRecord]) -> Vec<Observation> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let Some(value) = record.value else {
            continue;
        };
        let Some(year) = parse_year(record.date.as_deref()) else {
            continue;
        };
        out.push(Observation { year, value });
    }

    // sort_by_key is stable: equal years keep response order.
    out.sort_by_key(|obs| obs.year);
    out
}

fn parse_year(date: Option<&str>) -> Option<i32> {
    date?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, value: Option<f64>) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            value,
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_records(&[]).is_empty());
    }

    #[test]
    fn null_values_are_dropped_and_the_rest_kept() {
        let records = vec![
            record("2000", Some(100.0)),
            record("2001", None),
            record("2002", Some(120.0)),
        ];
        let obs = normalize_records(&records);

        assert_eq!(
            obs,
            vec![
                Observation { year: 2000, value: 100.0 },
                Observation { year: 2002, value: 120.0 },
            ]
        );
    }

    #[test]
    fn output_length_equals_non_null_record_count() {
        let records = vec![
            record("1999", None),
            record("2003", Some(1.0)),
            record("2001", Some(2.0)),
            record("2002", None),
        ];
        let non_null = records.iter().filter(|r| r.value.is_some()).count();
        assert_eq!(normalize_records(&records).len(), non_null);
    }

    #[test]
    fn output_is_sorted_ascending_by_year() {
        // The API returns newest-first; normalization flips that.
        let records = vec![
            record("2020", Some(3.0)),
            record("2010", Some(2.0)),
            record("2000", Some(1.0)),
        ];
        let years: Vec<i32> = normalize_records(&records).iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2000, 2010, 2020]);
    }

    #[test]
    fn sort_is_stable_for_equal_years() {
        let records = vec![
            record("2005", Some(1.0)),
            record("2000", Some(7.0)),
            record("2005", Some(2.0)),
        ];
        let obs = normalize_records(&records);

        assert_eq!(obs[0].year, 2000);
        assert_eq!(obs[1].value, 1.0);
        assert_eq!(obs[2].value, 2.0);
    }

    #[test]
    fn non_numeric_dates_are_dropped() {
        let records = vec![
            record("2000", Some(1.0)),
            record("not-a-year", Some(2.0)),
            RawRecord { date: None, value: Some(3.0) },
        ];
        let obs = normalize_records(&records);

        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].year, 2000);
    }

    #[test]
    fn values_are_carried_unchanged() {
        let records = vec![record("2000", Some(0.123_456_789_012_345))];
        assert_eq!(normalize_records(&records)[0].value, 0.123_456_789_012_345);
    }

    #[test]
    fn normalization_is_idempotent() {
        let records = vec![
            record("2010", Some(5.0)),
            record("1990", Some(1.0)),
            record("2001", None),
        ];
        let once = normalize_records(&records);

        let as_records: Vec<RawRecord> = once
            .iter()
            .map(|obs| record(&obs.year.to_string(), Some(obs.value)))
            .collect();
        let twice = normalize_records(&as_records);

        assert_eq!(once, twice);
    }
}
