//! Viewer Application
//! Window that shows presented figures until closed.

use crate::charts::Figure;
use crate::error::{EdaError, Result};
use crate::gui::ChartViewer;
use eframe::egui;

/// Main viewer window.
pub struct EdaViewerApp {
    chart_viewer: ChartViewer,
}

impl EdaViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figures: Vec<Figure>) -> Self {
        Self {
            chart_viewer: ChartViewer::new(figures),
        }
    }

    /// Open a window over `figures` and block until it is closed.
    pub fn run(title: &str, figures: Vec<Figure>) -> Result<()> {
        log::info!("Opening viewer with {} figure(s)", figures.len());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1400.0, 800.0])
                .with_min_inner_size([900.0, 500.0])
                .with_title(title),
            ..Default::default()
        };

        eframe::run_native(
            title,
            options,
            Box::new(|cc| Ok(Box::new(EdaViewerApp::new(cc, figures)))),
        )
        .map_err(EdaError::render)
    }
}

impl eframe::App for EdaViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
