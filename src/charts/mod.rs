//! Charts module - Figure model and rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{sanitize_file_stem, Figure};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
