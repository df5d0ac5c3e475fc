//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the load pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::catalog::Catalog;
use crate::cli::{Command, LoadArgs, PlotArgs};
use crate::data::worldbank::WorldBankClient;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `wbt` binary.
pub fn run() -> Result<(), AppError> {
    // We want `wbt` and `wbt -i SP.POP.TOTL` to behave like `wbt tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Load(args) => handle_load(args),
        Command::Plot(args) => handle_plot(args),
        Command::Indicators => handle_indicators(),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_load(args: LoadArgs) -> Result<(), AppError> {
    let catalog = Catalog::builtin();
    let client = WorldBankClient::new();
    let request = args.request();

    let output = pipeline::run_load(&client, &request)?;

    println!(
        "{}",
        crate::report::format_load_summary(&request, &output, &catalog)
    );

    if args.plot && !args.no_plot {
        let datasets = crate::chart::build_datasets(&output.series, &catalog);
        println!(
            "{}",
            crate::plot::render_ascii_chart(&datasets, args.width, args.height)
        );
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::write_observations_csv(path, &output.series, &catalog)?;
    }
    if let Some(path) = &args.export_series {
        crate::io::write_series_json(path, &output, &request.years)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let catalog = Catalog::builtin();
    let file = crate::io::read_series_json(&args.series)?;

    let datasets = crate::chart::build_datasets(&file.series, &catalog);
    println!(
        "{}",
        crate::plot::render_ascii_chart(&datasets, args.width, args.height)
    );
    Ok(())
}

fn handle_indicators() -> Result<(), AppError> {
    let catalog = Catalog::builtin();
    for indicator in catalog.indicators() {
        println!("{:<20} {}", indicator.code, indicator.label);
    }
    Ok(())
}

fn handle_tui(args: LoadArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Rewrite argv so `wbt` defaults to `wbt tui`.
///
/// Rules:
/// - `wbt`                      -> `wbt tui`
/// - `wbt -i SP.POP.TOTL ...`   -> `wbt tui -i SP.POP.TOTL ...`
/// - `wbt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "load" | "plot" | "indicators" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
