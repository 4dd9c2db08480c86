//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the pricing pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CurveArgs, PlotArgs, PriceArgs};
use crate::domain::PricingConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bondpx` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; explicit env vars and flags still apply.
    dotenvy::dotenv().ok();

    // We want bare `bondpx` and `bondpx -y 0.05` to behave like `bondpx tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    // The TUI owns the terminal; a stderr subscriber would draw over its frame.
    if !matches!(cli.command, Command::Tui(_)) {
        init_logging(cli.verbose);
    }

    match cli.command {
        Command::Price(args) => handle_price(args),
        Command::Curve(args) => handle_curve(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "bond_pricer=debug" } else { "bond_pricer=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so stdout stays clean for reports and redirects.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_price(args: PriceArgs) -> Result<(), AppError> {
    let config = PricingConfig {
        bond: args.bond.to_spec(),
        strict: !args.bond.no_validate,
        range: None,
        schedule: args.schedule,
        plot: false,
        plot_width: 0,
        plot_height: 0,
        export_results: None,
        export_curve: None,
    };
    let run = pipeline::run_pricing(&config)?;
    run.log_notes();

    println!("{}", crate::report::format_price_summary(&run.bond, &run.breakdown));
    if config.schedule {
        println!("{}", crate::report::format_schedule(&run.schedule));
    }
    Ok(())
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let config = pricing_config_from_args(&args);
    let run = pipeline::run_pricing(&config)?;
    run.log_notes();

    println!("{}", crate::report::format_price_line(run.breakdown.price));

    if args.table {
        println!(
            "{}",
            crate::report::format_curve_table(&run.curve, run.bond.face_value)
        );
    }

    if config.plot {
        let plot = crate::plot::render_price_yield_plot(
            &run.curve,
            Some(run.bond.face_value),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.curve, &run.bond)?;
    }
    if let (Some(path), Some(range)) = (&config.export_curve, &config.range) {
        let curve = crate::io::curve::build_curve_file(&run.bond, run.breakdown.price, range, &run.curve);
        crate::io::curve::write_curve_json(path, &curve)?;
    }

    Ok(())
}

fn handle_tui(args: CurveArgs) -> Result<(), AppError> {
    crate::tui::run(pricing_config_from_args(&args))
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    println!("{}", crate::report::format_price_line(curve.price));
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{plot}");
    Ok(())
}

pub fn pricing_config_from_args(args: &CurveArgs) -> PricingConfig {
    PricingConfig {
        bond: args.bond.to_spec(),
        strict: !args.bond.no_validate,
        range: Some(args.range()),
        schedule: false,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

/// Rewrite argv so `bondpx` defaults to `bondpx tui`.
///
/// Rules:
/// - `bondpx`                      -> `bondpx tui`
/// - `bondpx -y 0.05 ...`          -> `bondpx tui -y 0.05 ...`
/// - `bondpx --help/--version/-h`  -> unchanged (show top-level help/version)
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

    let is_subcommand = matches!(arg1.as_str(), "price" | "curve" | "plot" | "tui");
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

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["bondpx"])), argv(&["bondpx", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["bondpx", "-y", "0.05"])),
            argv(&["bondpx", "tui", "-y", "0.05"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["bondpx", "price"])), argv(&["bondpx", "price"]));
        assert_eq!(rewrite_args(argv(&["bondpx", "--help"])), argv(&["bondpx", "--help"]));
    }

    #[test]
    fn curve_args_map_to_config() {
        let cli = crate::cli::Cli::parse_from(["bondpx", "curve", "--steps", "11", "--no-plot", "--no-validate"]);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve subcommand");
        };
        let config = pricing_config_from_args(&args);
        assert!(!config.plot);
        assert!(!config.strict);
        assert_eq!(config.range.map(|r| r.steps), Some(11));
    }
}
