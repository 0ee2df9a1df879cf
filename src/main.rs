//! eda-plots - Diagnostic and per-category plots for CSV data
//!
//! Writes PNG files by default; `--show` opens a viewer window instead.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use eda_plots::data::{is_numeric_dtype, DataLoader};
use eda_plots::{
    diagnose_numeric_columns, diagnostic_plots, plot_target_by_category, Figure, PlotConfig,
    PngSurface, Surface, ViewerSurface,
};
use polars::prelude::DataFrame;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eda-plots")]
#[command(about = "Exploratory data analysis plots for CSV files", long_about = None)]
struct Args {
    /// Path to the CSV file
    csv: PathBuf,

    /// JSON plot configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for PNG output
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Show figures in a window instead of writing PNGs
    #[arg(long)]
    show: bool,

    /// Open each written PNG with the system viewer
    #[arg(long, conflicts_with = "show")]
    open: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Histogram, boxplot and Q-Q plot for numeric columns
    Diagnose {
        /// Columns to plot
        columns: Vec<String>,

        /// Plot every numeric column
        #[arg(long, conflicts_with = "columns")]
        all: bool,
    },
    /// Bar chart of the mean target value per category
    ByCategory {
        /// Numeric target column
        #[arg(long)]
        target: String,

        /// Categorical grouping column
        #[arg(long)]
        category: String,

        /// Y-axis label (defaults to "Mean <target>")
        #[arg(long)]
        ylabel: Option<String>,
    },
    /// List columns, dtypes and the row count
    Columns,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => PlotConfig::default(),
    };

    let mut loader = DataLoader::new();
    loader
        .load_csv(&args.csv)
        .with_context(|| format!("Failed to load {}", args.csv.display()))?;
    let df = loader.get_dataframe()?;

    if let Command::Columns = args.command {
        for (name, dtype) in loader.get_column_dtypes() {
            let marker = if is_numeric_dtype(&dtype) { "*" } else { " " };
            println!("{} {:<30} {}", marker, name, dtype);
        }
        println!(
            "{} rows, {} numeric column(s)",
            loader.get_row_count(),
            loader.get_numeric_columns().len()
        );
        return Ok(());
    }

    if args.show {
        let mut surface = ViewerSurface::new();
        present(&args.command, df, &config, &mut surface)?;
        surface.show("EDA Plots")?;
    } else {
        let mut surface = PngSurface::new(&args.out_dir, config.clone()).open_after(args.open);
        present(&args.command, df, &config, &mut surface)?;
        for path in surface.written() {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Run the requested plotting command against a surface.
fn present<S: Surface>(
    command: &Command,
    df: &DataFrame,
    config: &PlotConfig,
    surface: &mut S,
) -> Result<()> {
    match command {
        Command::Diagnose { columns, all: true } if columns.is_empty() => {
            let mut failed = 0;
            let results = diagnose_numeric_columns(df, config);
            let total = results.len();
            for (name, result) in results {
                match result {
                    Ok(summary) => surface.present(Figure::Diagnostics(summary))?,
                    Err(e) => {
                        log::error!("Skipping '{}': {}", name, e);
                        failed += 1;
                    }
                }
            }
            if total == 0 {
                bail!("No numeric columns to plot");
            }
            if failed == total {
                bail!("No column could be plotted");
            }
        }
        Command::Diagnose { columns, .. } => {
            if columns.is_empty() {
                bail!("Name at least one column or pass --all");
            }
            for name in columns {
                diagnostic_plots(df, name, config, surface)
                    .with_context(|| format!("Diagnostics for '{}' failed", name))?;
            }
        }
        Command::ByCategory {
            target,
            category,
            ylabel,
        } => {
            let ylabel = ylabel
                .clone()
                .unwrap_or_else(|| format!("Mean {}", target));
            plot_target_by_category(df, target, category, &ylabel, config, surface)
                .with_context(|| format!("Plotting '{}' by '{}' failed", target, category))?;
        }
        Command::Columns => {}
    }
    Ok(())
}
