//! Chart Plotter Module
//! Draws figures interactively using egui_plot.

use crate::data::CategoryMeans;
use crate::stats::DiagnosticSummary;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoints, Points};

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const FIT_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const OUTLIER_COLOR: Color32 = Color32::from_rgb(96, 125, 139); // Blue Grey

/// Creates interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Histogram panel: one bar per bin, centred on the bin.
    pub fn draw_histogram(ui: &mut egui::Ui, summary: &DiagnosticSummary, height: f32) {
        let bars: Vec<Bar> = summary
            .histogram
            .bins()
            .map(|(left, right, count)| {
                Bar::new((left + right) / 2.0, count as f64)
                    .width(right - left)
                    .name(format!("[{:.3}, {:.3})", left, right))
            })
            .collect();

        Plot::new(format!("histogram_{}", summary.variable))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(summary.variable.clone())
            .y_axis_label("Count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Count"));
            });
    }

    /// Boxplot panel for the column.
    pub fn draw_boxplot(ui: &mut egui::Ui, summary: &DiagnosticSummary, height: f32) {
        let b = &summary.boxplot;

        Plot::new(format!("boxplot_{}", summary.variable))
            .height(height)
            .allow_scroll(false)
            .show_x(false)
            .y_axis_label(summary.variable.clone())
            .x_axis_formatter(|_mark, _range| String::new())
            .show(ui, |plot_ui| {
                let box_elem = BoxElem::new(
                    0.0,
                    BoxSpread::new(b.whisker_low, b.q1, b.median, b.q3, b.whisker_high),
                )
                .box_width(0.5)
                .fill(BAR_COLOR.gamma_multiply(0.3))
                .stroke(egui::Stroke::new(1.5, BAR_COLOR));

                plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(&summary.variable));

                if !b.outliers.is_empty() {
                    let points: PlotPoints = b.outliers.iter().map(|&v| [0.0, v]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(3.0)
                            .color(OUTLIER_COLOR)
                            .name("Outliers"),
                    );
                }
            });
    }

    /// Q-Q panel: ordered values against normal quantiles, plus the fit line.
    pub fn draw_qq_chart(ui: &mut egui::Ui, summary: &DiagnosticSummary, height: f32) {
        let qq = &summary.qq;

        Plot::new(format!("qq_{}", summary.variable))
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Theoretical quantiles")
            .y_axis_label("Ordered Values")
            .show(ui, |plot_ui| {
                let points: PlotPoints = qq.points().map(|(x, y)| [x, y]).collect();
                plot_ui.points(Points::new(points).radius(3.0).color(BAR_COLOR));

                if let (Some(fit), Some(first), Some(last)) =
                    (qq.fit, qq.theoretical.first(), qq.theoretical.last())
                {
                    let line: PlotPoints =
                        vec![[*first, fit.at(*first)], [*last, fit.at(*last)]].into();
                    plot_ui.line(
                        Line::new(line)
                            .color(FIT_COLOR)
                            .width(1.5)
                            .name(format!("r = {:.4}", fit.r)),
                    );
                }
            });
    }

    /// Bar chart of per-category means.
    pub fn draw_category_bars(ui: &mut egui::Ui, means: &CategoryMeans, height: f32) {
        let labels = means.categories();
        let bars: Vec<Bar> = means
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                row.mean
                    .map(|m| Bar::new(i as f64, m).width(0.6).name(&row.category))
            })
            .collect();

        Plot::new(format!("bars_{}_{}", means.target, means.category))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(means.category.clone())
            .y_axis_label(means.ylabel.clone())
            .x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if (v - v.round()).abs() > 1e-6 || v < 0.0 {
                    return String::new();
                }
                labels.get(v.round() as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name(&means.ylabel));
            });
    }

    /// Summary table under the diagnostic panels.
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &DiagnosticSummary) {
        let b = &summary.boxplot;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("summary_{}", summary.variable)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["N", "Mean", "Q1", "Median", "Q3", "Outliers", "Q-Q r"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        ui.label(RichText::new(b.count.to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", b.mean)).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", b.q1)).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", b.median)).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", b.q3)).size(11.0));
                        ui.label(RichText::new(b.outliers.len().to_string()).size(11.0));
                        match summary.qq.fit {
                            Some(fit) => ui.label(RichText::new(format!("{:.4}", fit.r)).size(11.0)),
                            None => ui.label(RichText::new("-").size(11.0)),
                        };
                        ui.end_row();
                    });
            });
    }
}
