use clap::{Args, Parser, Subcommand};
use nanoindent::core::models::table::Column;
use nanoindent::workflows::plots::PlotKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Jesús Loera",
    version,
    about = "nanoindent - Post-processing of molecular-dynamics nanoindentation simulations: contact area, coordination, stress-strain curves and plots.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute derived columns and export the indentation table as CSV.
    Analyze(AnalyzeArgs),
    /// Render a single indentation curve to SVG.
    Plot(PlotArgs),
    /// Render every indentation curve and the table into an output directory.
    Report(ReportArgs),
}

/// Inputs and parameter overrides shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the LAMMPS dump trajectory of the indentation run.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub dump: PathBuf,

    /// Path to the indenter timeseries (timestep initdiam xeta force pote).
    #[arg(short, long = "timeseries", required = true, value_name = "PATH")]
    pub timeseries: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the coordination cutoff radius in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the projected area of one contact atom in square Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub atomic_area: Option<f64>,

    /// Override the half-thickness of the contact slab around the indenter plane.
    #[arg(long, value_name = "FLOAT")]
    pub plane_tolerance: Option<f64>,

    /// Override the gap between indenter plane and particle surface at first contact.
    #[arg(long, value_name = "FLOAT")]
    pub indenter_offset: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S coordination.cutoff=2.35
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path for the exported CSV table.
    #[arg(short, long, default_value = "indentation.csv", value_name = "PATH")]
    pub output: PathBuf,

    /// Comma-separated columns to compute (e.g. strain,stress,percent-cn-4). Defaults to all.
    #[arg(long, value_delimiter = ',', value_name = "COLUMNS")]
    pub columns: Vec<Column>,
}

/// Arguments for the `plot` subcommand.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// The curve to draw (e.g. force-displacement, stress-strain, coordination-strain).
    #[arg(required = true, value_name = "KIND")]
    pub kind: PlotKind,

    #[command(flatten)]
    pub input: InputArgs,

    /// Path for the SVG output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Title drawn above the chart. Defaults to a description of the curve.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,
}

/// Arguments for the `report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory receiving one SVG per curve and the CSV table. Created if missing.
    #[arg(short = 'O', long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Text prepended to every chart title.
    #[arg(long, value_name = "TEXT")]
    pub title_prefix: Option<String>,
}
