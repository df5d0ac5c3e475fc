//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each series is drawn as connected line segments using its own marker
//! glyph, assigned by position index; a legend below the grid maps glyphs
//! back to labels.

use crate::chart::ChartDataset;

/// Marker glyphs by series index (wraps for very wide selections).
const SERIES_MARKERS: &[char] = &['o', 'x', '+', '*', '#', '@', '%', '&'];

/// Render every dataset into one fixed-size grid.
pub fn render_ascii_chart(datasets: &[ChartDataset], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(datasets).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(datasets).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (idx, dataset) in datasets.iter().enumerate() {
        let marker = SERIES_MARKERS[idx % SERIES_MARKERS.len()];
        draw_series(&mut grid, &dataset.points, marker, x_min, x_max, y_min, y_max);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: year=[{x_min:.0}, {x_max:.0}] | value=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (idx, dataset) in datasets.iter().enumerate() {
        let marker = SERIES_MARKERS[idx % SERIES_MARKERS.len()];
        out.push_str(&format!("{marker} {}\n", dataset.label));
    }

    out
}

fn draw_series(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    marker: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    // Segments first (blank cells only), then the points themselves, which
    // always win over line cells.
    let mut prev = None;
    for &(x, y) in points {
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        if let Some((px, py)) = prev {
            draw_line(grid, px, py, cx, cy, marker);
        }
        prev = Some((cx, cy));
    }

    for &(x, y) in points {
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        grid[cy][cx] = marker;
    }
}

fn x_range(datasets: &[ChartDataset]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for dataset in datasets {
        for &(x, _) in &dataset.points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
    }
    if !(min_x.is_finite() && max_x.is_finite()) {
        return None;
    }
    if max_x > min_x {
        Some((min_x, max_x))
    } else {
        // A single year still needs a non-degenerate axis.
        Some((min_x - 0.5, max_x + 0.5))
    }
}

fn y_range(datasets: &[ChartDataset]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for dataset in datasets {
        for &(_, y) in &dataset.points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() {
        Some((min_y - 0.5, min_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::color_for_index;

    fn dataset(label: &str, idx: usize, points: Vec<(f64, f64)>) -> ChartDataset {
        ChartDataset {
            label: label.to_string(),
            color: color_for_index(idx),
            points,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let datasets = vec![dataset(
            "Population",
            0,
            vec![(2000.0, 0.0), (2010.0, 10.0)],
        )];

        let txt = render_ascii_chart(&datasets, 11, 6);
        let expected = concat!(
            "Plot: year=[2000, 2010] | value=[-0.50, 10.50]\n",
            "         oo\n",
            "       oo  \n",
            "     oo    \n",
            "   oo      \n",
            " oo        \n",
            "o          \n",
            "o Population\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn each_series_uses_its_own_marker() {
        let datasets = vec![
            dataset("A", 0, vec![(2000.0, 1.0), (2001.0, 1.0)]),
            dataset("B", 1, vec![(2000.0, 2.0), (2001.0, 2.0)]),
        ];

        let txt = render_ascii_chart(&datasets, 20, 8);

        assert!(txt.contains('o'));
        assert!(txt.contains('x'));
        assert!(txt.contains("o A"));
        assert!(txt.contains("x B"));
    }

    #[test]
    fn no_data_still_renders_an_empty_grid() {
        let txt = render_ascii_chart(&[], 12, 5);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[1..].iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn empty_series_is_charted_as_an_invisible_line() {
        let datasets = vec![
            dataset("Empty", 0, Vec::new()),
            dataset("Full", 1, vec![(2000.0, 1.0), (2002.0, 3.0)]),
        ];

        let txt = render_ascii_chart(&datasets, 20, 8);

        // The empty series contributes no glyphs to the grid but still
        // appears in the legend.
        assert!(txt.contains("o Empty"));
        assert!(txt.contains("x Full"));
        let grid: String = txt.lines().skip(1).take(8).collect();
        assert!(!grid.contains('o'));
    }
}
