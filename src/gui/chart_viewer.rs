//! Chart Viewer Widget
//! Scrollable panel that shows every presented figure as a card.

use crate::charts::{ChartPlotter, Figure};
use egui::{Color32, RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const PANEL_HEIGHT: f32 = 280.0;
const BAR_HEIGHT: f32 = 360.0;

const TITLE_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

/// Scrollable figure display, one card per figure in presentation order.
#[derive(Default)]
pub struct ChartViewer {
    figures: Vec<Figure>,
}

impl ChartViewer {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self { figures }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.figures.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for figure in &self.figures {
                    Self::draw_card(ui, figure);
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, figure: &Figure) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(figure.title())
                        .size(18.0)
                        .strong()
                        .color(TITLE_COLOR),
                );
                ui.add_space(8.0);

                match figure {
                    Figure::Diagnostics(summary) => {
                        let panel_width = (ui.available_width() - 2.0 * CHART_SPACING) / 3.0;
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.set_width(panel_width);
                                ui.label(RichText::new("Histogram").size(14.0).strong());
                                ChartPlotter::draw_histogram(ui, summary, PANEL_HEIGHT);
                            });
                            ui.add_space(CHART_SPACING);
                            ui.vertical(|ui| {
                                ui.set_width(panel_width);
                                ui.label(RichText::new("Boxplot").size(14.0).strong());
                                ChartPlotter::draw_boxplot(ui, summary, PANEL_HEIGHT);
                            });
                            ui.add_space(CHART_SPACING);
                            ui.vertical(|ui| {
                                ui.set_width(panel_width);
                                ui.label(RichText::new("Q-Q plot").size(14.0).strong());
                                ChartPlotter::draw_qq_chart(ui, summary, PANEL_HEIGHT);
                            });
                        });
                        ui.add_space(10.0);
                        ChartPlotter::draw_summary_table(ui, summary);
                    }
                    Figure::CategoryBars(means) => {
                        ChartPlotter::draw_category_bars(ui, means, BAR_HEIGHT);
                    }
                }
            });
    }
}
