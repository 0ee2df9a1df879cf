//! GUI module - Figure viewer window

mod app;
mod chart_viewer;

pub use app::EdaViewerApp;
pub use chart_viewer::ChartViewer;
