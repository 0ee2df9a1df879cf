//! Static Chart Renderer
//! Draws figures to PNG files with plotters.
//!
//! Layout:
//! 1. Diagnostics: three panels side by side
//!    - Left: Histogram (fixed bin count)
//!    - Middle: Boxplot (quartiles, whiskers, outliers)
//!    - Right: Q-Q plot against the normal distribution with fit line
//! 2. Category bars: one bar per category, titled "{ylabel} by {category}"

use crate::charts::Figure;
use crate::config::PlotConfig;
use crate::data::CategoryMeans;
use crate::error::{EdaError, Result};
use crate::stats::DiagnosticSummary;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// Colors
const BAR_BLUE: RGBColor = RGBColor(91, 155, 213);
const BOX_FILL: RGBColor = RGBColor(189, 215, 238);
const FIT_RED: RGBColor = RGBColor(237, 125, 49);
const EDGE: RGBColor = RGBColor(60, 60, 60);

const TITLE_SIZE: u32 = 20;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a figure to a PNG file at `path`.
    pub fn render_to_file(figure: &Figure, path: &Path, config: &PlotConfig) -> Result<()> {
        let drawn = match figure {
            Figure::Diagnostics(summary) => Self::draw_diagnostics_png(summary, path, config),
            Figure::CategoryBars(means) => Self::draw_category_bars_png(means, path, config),
        };
        drawn.map_err(EdaError::render)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    fn draw_diagnostics_png(
        summary: &DiagnosticSummary,
        path: &Path,
        config: &PlotConfig,
    ) -> DrawResult<()> {
        let root = BitMapBackend::new(path, config.diagnostic_size).into_drawing_area();
        Self::draw_diagnostics(&root, summary, &config.font_family)?;
        root.present()?;
        Ok(())
    }

    fn draw_category_bars_png(
        means: &CategoryMeans,
        path: &Path,
        config: &PlotConfig,
    ) -> DrawResult<()> {
        let root = BitMapBackend::new(path, config.bar_size).into_drawing_area();
        Self::draw_category_bars(&root, means, &config.font_family)?;
        root.present()?;
        Ok(())
    }

    /// Draw the three diagnostic panels onto any backend.
    pub fn draw_diagnostics<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        summary: &DiagnosticSummary,
        font: &str,
    ) -> DrawResult<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 3));

        Self::draw_histogram(&panels[0], summary, font)?;
        Self::draw_boxplot(&panels[1], summary, font)?;
        Self::draw_qq_plot(&panels[2], summary, font)?;
        Ok(())
    }

    fn draw_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &DiagnosticSummary,
        font: &str,
    ) -> DrawResult<()>
    where
        DB::ErrorType: 'static,
    {
        let hist = &summary.histogram;
        let x_min = hist.edges.first().copied().unwrap_or(0.0);
        let x_max = hist.edges.last().copied().unwrap_or(1.0);
        let y_max = hist.max_count().max(1) as f64 * 1.05;

        let mut chart = ChartBuilder::on(area)
            .caption("Histogram", (font, TITLE_SIZE))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(summary.variable.as_str())
            .y_desc("Count")
            .draw()?;

        chart.draw_series(hist.bins().map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], BAR_BLUE.filled())
        }))?;
        chart.draw_series(hist.bins().filter(|&(_, _, c)| c > 0).map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], EDGE.stroke_width(1))
        }))?;

        Ok(())
    }

    fn draw_boxplot<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &DiagnosticSummary,
        font: &str,
    ) -> DrawResult<()>
    where
        DB::ErrorType: 'static,
    {
        let b = &summary.boxplot;
        let low = b
            .outliers
            .first()
            .copied()
            .unwrap_or(b.whisker_low)
            .min(b.whisker_low);
        let high = b
            .outliers
            .last()
            .copied()
            .unwrap_or(b.whisker_high)
            .max(b.whisker_high);

        let mut chart = ChartBuilder::on(area)
            .caption("Boxplot", (font, TITLE_SIZE))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(0f64..1f64, padded_range(low, high))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_x_axis()
            .y_desc(summary.variable.as_str())
            .draw()?;

        let (left, right, center) = (0.3, 0.7, 0.5);
        let (cap_left, cap_right) = (0.4, 0.6);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, b.q1), (right, b.q3)],
            BOX_FILL.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, b.q1), (right, b.q3)],
            EDGE.stroke_width(1),
        )))?;

        let strokes = vec![
            vec![(left, b.median), (right, b.median)],
            vec![(center, b.q1), (center, b.whisker_low)],
            vec![(center, b.q3), (center, b.whisker_high)],
            vec![(cap_left, b.whisker_low), (cap_right, b.whisker_low)],
            vec![(cap_left, b.whisker_high), (cap_right, b.whisker_high)],
        ];
        chart.draw_series(
            strokes
                .into_iter()
                .map(|points| PathElement::new(points, EDGE.stroke_width(2))),
        )?;

        chart.draw_series(
            b.outliers
                .iter()
                .map(|&v| Circle::new((center, v), 3, EDGE.stroke_width(1))),
        )?;

        Ok(())
    }

    fn draw_qq_plot<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &DiagnosticSummary,
        font: &str,
    ) -> DrawResult<()>
    where
        DB::ErrorType: 'static,
    {
        let qq = &summary.qq;
        let (x_min, x_max) = min_max(&qq.theoretical).unwrap_or((-1.0, 1.0));
        let (y_min, y_max) = min_max(&qq.ordered).unwrap_or((0.0, 1.0));
        let x_range = padded_range(x_min, x_max);

        let mut chart = ChartBuilder::on(area)
            .caption("Q-Q plot", (font, TITLE_SIZE))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x_range.clone(), padded_range(y_min, y_max))?;

        chart
            .configure_mesh()
            .x_desc("Theoretical quantiles")
            .y_desc("Ordered Values")
            .draw()?;

        chart.draw_series(
            qq.points()
                .map(|(x, y)| Circle::new((x, y), 3, BAR_BLUE.filled())),
        )?;

        if let Some(fit) = qq.fit {
            chart.draw_series(LineSeries::new(
                [x_range.start, x_range.end].map(|x| (x, fit.at(x))),
                FIT_RED.stroke_width(2),
            ))?;
        }

        Ok(())
    }

    /// Draw the per-category mean bar chart onto any backend.
    pub fn draw_category_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        means: &CategoryMeans,
        font: &str,
    ) -> DrawResult<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let labels = means.categories();
        let n = labels.len().max(1) as u32;
        let (low, high) = means.value_range().unwrap_or((0.0, 0.0));
        let y_range = bar_value_range(low, high);

        let mut chart = ChartBuilder::on(root)
            .caption(means.title(), (font, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d((0u32..n).into_segmented(), y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(means.category.as_str())
            .y_desc(means.ylabel.as_str())
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(
            means
                .rows
                .iter()
                .enumerate()
                .filter_map(|(i, row)| row.mean.map(|m| (i as u32, m)))
                .map(|(i, m)| {
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), m)],
                        BAR_BLUE.filled(),
                    );
                    bar.set_margin(0, 0, 8, 8);
                    bar
                }),
        )?;

        Ok(())
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Axis range around [low, high] with a margin; never empty.
fn padded_range(low: f64, high: f64) -> Range<f64> {
    if high > low {
        let pad = (high - low) * 0.08;
        (low - pad)..(high + pad)
    } else {
        (low - 1.0)..(high + 1.0)
    }
}

/// Value axis for bars, always including zero.
fn bar_value_range(low: f64, high: f64) -> Range<f64> {
    let low = low.min(0.0);
    let high = high.max(0.0);
    if high <= low {
        return 0.0..1.0;
    }
    let pad = (high - low) * 0.08;
    let start = if low < 0.0 { low - pad } else { 0.0 };
    let end = if high > 0.0 { high + pad } else { 0.0 };
    start..end
}
