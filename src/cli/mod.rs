//! Command-line parsing for the World Bank series viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/normalize code.

use std::path::PathBuf;

use chrono::Datelike;
use clap::{Parser, Subcommand};

use crate::domain::{LoadRequest, Scope, YearRange};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wbt", version, about = "World Bank indicator series viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the selected indicators once, print a summary, and plot.
    Load(LoadArgs),
    /// Plot a previously exported series JSON.
    Plot(PlotArgs),
    /// List the built-in indicator catalog (codes and labels).
    Indicators,
    /// Launch the interactive TUI.
    ///
    /// This uses the same load pipeline as `wbt load`, but renders results
    /// in a terminal UI using Ratatui.
    Tui(LoadArgs),
}

/// Common options for selecting and loading series.
#[derive(Debug, Parser, Clone)]
pub struct LoadArgs {
    /// Country ISO-3 code (e.g. USA). Scope defaults to world when neither
    /// this nor --continent is given.
    #[arg(short = 'c', long, conflicts_with = "continent")]
    pub country: Option<String>,

    /// Continent aggregate code (e.g. EAS).
    #[arg(long)]
    pub continent: Option<String>,

    /// Indicator code(s) to fetch (repeatable).
    #[arg(short = 'i', long = "indicator")]
    pub indicators: Vec<String>,

    /// First year of the range.
    #[arg(long, default_value_t = 2000)]
    pub start: i32,

    /// Last year of the range (defaults to the current year).
    #[arg(long, default_value_t = current_year())]
    pub end: i32,

    /// Render an ASCII chart in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export observations to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full load (scope, years, series) to JSON.
    #[arg(long = "export-series")]
    pub export_series: Option<PathBuf>,
}

impl LoadArgs {
    /// The scope encoded by the flags; world when neither code is given.
    pub fn scope(&self) -> Scope {
        if let Some(code) = &self.country {
            Scope::Country(code.clone())
        } else if let Some(code) = &self.continent {
            Scope::Continent(code.clone())
        } else {
            Scope::World
        }
    }

    /// The load command these flags describe.
    pub fn request(&self) -> LoadRequest {
        LoadRequest {
            scope: self.scope(),
            indicators: self.indicators.clone(),
            years: YearRange::new(self.start, self.end),
        }
    }
}

/// Options for plotting a saved series file.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Series JSON file produced by `wbt load --export-series`.
    #[arg(long, value_name = "JSON")]
    pub series: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_args(argv: &[&str]) -> LoadArgs {
        match Cli::parse_from(argv).command {
            Command::Load(args) => args,
            other => panic!("expected load, got {other:?}"),
        }
    }

    #[test]
    fn scope_defaults_to_world() {
        let args = load_args(&["wbt", "load", "-i", "SP.POP.TOTL"]);
        assert_eq!(args.scope(), Scope::World);
    }

    #[test]
    fn country_flag_selects_country_scope() {
        let args = load_args(&["wbt", "load", "-c", "USA"]);
        assert_eq!(args.scope(), Scope::Country("USA".to_string()));
    }

    #[test]
    fn continent_flag_selects_continent_scope() {
        let args = load_args(&["wbt", "load", "--continent", "EAS"]);
        assert_eq!(args.scope(), Scope::Continent("EAS".to_string()));
    }

    #[test]
    fn request_carries_indicators_and_years() {
        let args = load_args(&[
            "wbt", "load", "-i", "A", "-i", "B", "--start", "1990", "--end", "1995",
        ]);
        let request = args.request();
        assert_eq!(request.indicators, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(request.years, YearRange::new(1990, 1995));
    }
}
