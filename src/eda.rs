//! Plotting operations
//! Compute a summary from the dataset, then hand the figure to a surface.

use crate::charts::Figure;
use crate::config::PlotConfig;
use crate::data::{is_numeric_dtype, DataProcessor};
use crate::error::Result;
use crate::stats::DiagnosticSummary;
use crate::surface::Surface;
use polars::prelude::DataFrame;
use rayon::prelude::*;

/// Histogram, boxplot and normal Q-Q plot of one numeric column.
///
/// Fails with a lookup error when the column is absent and a type error when it is
/// not numeric; nothing is presented in either case.
pub fn diagnostic_plots<S: Surface + ?Sized>(
    df: &DataFrame,
    variable: &str,
    config: &PlotConfig,
    surface: &mut S,
) -> Result<()> {
    let summary = DiagnosticSummary::compute(df, variable, config)?;
    surface.present(Figure::Diagnostics(summary))
}

/// Bar chart of the mean of `target` for each value of `category`.
///
/// Means are rounded to `config.mean_decimals` places and the chart is titled
/// "{ylabel} by {category}".
pub fn plot_target_by_category<S: Surface + ?Sized>(
    df: &DataFrame,
    target: &str,
    category: &str,
    ylabel: &str,
    config: &PlotConfig,
    surface: &mut S,
) -> Result<()> {
    let means = DataProcessor::category_means(df, target, category, ylabel, config.mean_decimals)?;
    surface.present(Figure::CategoryBars(means))
}

/// Diagnostic summaries for every numeric column, computed in parallel.
///
/// Results follow column order; each column succeeds or fails on its own.
pub fn diagnose_numeric_columns(
    df: &DataFrame,
    config: &PlotConfig,
) -> Vec<(String, Result<DiagnosticSummary>)> {
    let columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect();

    log::info!("Computing diagnostics for {} numeric column(s)", columns.len());

    columns
        .par_iter()
        .map(|name| {
            let summary = DiagnosticSummary::compute(df, name, config).map_err(Into::into);
            (name.clone(), summary)
        })
        .collect()
}
