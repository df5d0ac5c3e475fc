//! Render-ready chart datasets.

use crate::catalog::Catalog;
use crate::domain::Series;

/// An RGB color for one chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A rendering-ready projection of one `Series`.
///
/// Derived, never mutated after creation; the whole dataset vector is
/// replaced on each render cycle.
#[derive(Debug, Clone)]
pub struct ChartDataset {
    pub label: String,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// Red-channel ramp: base offset and per-index step.
const RED_BASE: usize = 50;
const RED_STEP: usize = 50;
/// Green/blue channels shared by every series.
const GREEN: u8 = 90;
const BLUE: u8 = 135;

/// Build one dataset per series, preserving input order.
///
/// Labels come from the catalog, falling back to the raw indicator code for
/// unmapped codes. Colors depend only on the position index, never on
/// content.
pub fn build_datasets(series: &[Series], catalog: &Catalog) -> Vec<ChartDataset> {
    series
        .iter()
        .enumerate()
        .map(|(idx, s)| ChartDataset {
            label: catalog.label_for(&s.indicator_code),
            color: color_for_index(idx),
            points: s
                .observations
                .iter()
                .map(|obs| (obs.year as f64, obs.value))
                .collect(),
        })
        .collect()
}

/// Deterministic per-index color: a red ramp over fixed green/blue.
///
/// The red channel wraps within `[RED_BASE, 255]` so indices past the
/// fourth stay distinct instead of saturating.
pub fn color_for_index(idx: usize) -> Rgb {
    let span = 256 - RED_BASE;
    let r = (RED_BASE + (idx * RED_STEP) % span) as u8;
    Rgb { r, g: GREEN, b: BLUE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn series(code: &str, observations: Vec<Observation>) -> Series {
        Series {
            indicator_code: code.to_string(),
            observations,
        }
    }

    #[test]
    fn datasets_preserve_series_order_and_points() {
        let catalog = Catalog::builtin();
        let input = vec![
            series("SP.POP.TOTL", vec![Observation { year: 2000, value: 100.0 }]),
            series("NY.GDP.MKTP.CD", Vec::new()),
        ];

        let datasets = build_datasets(&input, &catalog);

        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].label, "Population");
        assert_eq!(datasets[0].points, vec![(2000.0, 100.0)]);
        assert_eq!(datasets[1].label, "GDP (current US$)");
        assert!(datasets[1].points.is_empty());
    }

    #[test]
    fn unmapped_codes_keep_the_raw_code_as_label() {
        let catalog = Catalog::builtin();
        let datasets = build_datasets(&[series("XX.MYSTERY", Vec::new())], &catalog);
        assert_eq!(datasets[0].label, "XX.MYSTERY");
    }

    #[test]
    fn colors_depend_only_on_position_index() {
        assert_eq!(color_for_index(0), color_for_index(0));
        assert_eq!(color_for_index(3), Rgb { r: 200, g: 90, b: 135 });
    }

    #[test]
    fn colors_are_distinct_for_the_whole_catalog_width() {
        let n = Catalog::builtin().indicators().len();
        for a in 0..n {
            for b in (a + 1)..n {
                assert_ne!(color_for_index(a), color_for_index(b), "indices {a} and {b}");
            }
        }
    }
}
