//! Command-line parsing for the bond pricer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pricing code.
//!
//! Every bond input can also come from the environment (or a `.env` file loaded
//! at start-up) via its `BONDPX_*` variable.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BondSpec, DEFAULT_FREQUENCY, YieldRange};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bondpx", version, about = "Fixed-coupon bond pricer (price from yield)")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price one bond and print the breakdown.
    Price(PriceArgs),
    /// Sweep yields, print the price/yield table and plot, and optionally export.
    Curve(CurveArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// Arrow keys adjust the bond inputs; the price/yield chart is redrawn from
    /// the same sweep `bondpx curve` uses.
    Tui(CurveArgs),
}

/// Bond inputs shared by every pricing command.
#[derive(Debug, Args, Clone)]
pub struct BondArgs {
    /// Face (par) value repaid at maturity.
    #[arg(long, env = "BONDPX_FACE_VALUE", default_value_t = 1000.0)]
    pub face_value: f64,

    /// Annual coupon rate as a decimal (0.05 = 5%).
    #[arg(short = 'c', long, env = "BONDPX_COUPON_RATE", default_value_t = 0.05)]
    pub coupon_rate: f64,

    /// Years to maturity (may be fractional).
    #[arg(short = 't', long = "years", env = "BONDPX_YEARS", default_value_t = 10.0)]
    pub years_to_maturity: f64,

    /// Annual yield to maturity as a decimal.
    #[arg(short = 'y', long = "ytm", env = "BONDPX_YTM", default_value_t = 0.04, allow_negative_numbers = true)]
    pub yield_to_maturity: f64,

    /// Coupon payments per year (1, 2, 4, 12, ...).
    #[arg(short = 'f', long, env = "BONDPX_FREQUENCY", default_value_t = DEFAULT_FREQUENCY)]
    pub frequency: u32,

    /// Skip the strict input checks and let the arithmetic decide.
    #[arg(long)]
    pub no_validate: bool,
}

impl BondArgs {
    pub fn to_spec(&self) -> BondSpec {
        BondSpec {
            face_value: self.face_value,
            coupon_rate: self.coupon_rate,
            years_to_maturity: self.years_to_maturity,
            yield_to_maturity: self.yield_to_maturity,
            frequency: self.frequency,
        }
    }
}

/// Options for `bondpx price`.
#[derive(Debug, Args, Clone)]
pub struct PriceArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Also print the discounted cash-flow schedule.
    #[arg(long)]
    pub schedule: bool,
}

/// Options for sweeping and plotting.
#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Lowest yield in the sweep.
    #[arg(long, default_value_t = YieldRange::default().ytm_min, allow_negative_numbers = true)]
    pub ytm_min: f64,

    /// Highest yield in the sweep.
    #[arg(long, default_value_t = YieldRange::default().ytm_max, allow_negative_numbers = true)]
    pub ytm_max: f64,

    /// Number of yields in the sweep (endpoints included).
    #[arg(long, default_value_t = YieldRange::default().steps)]
    pub steps: usize,

    /// Print the price/yield table.
    #[arg(long)]
    pub table: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the swept points to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the curve (bond + points) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

impl CurveArgs {
    pub fn range(&self) -> YieldRange {
        YieldRange {
            ytm_min: self.ytm_min,
            ytm_max: self.ytm_max,
            steps: self.steps,
        }
    }
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `bondpx curve --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
