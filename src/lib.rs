//! eda_plots - Exploratory data analysis plots
//!
//! Two operations over a polars `DataFrame`:
//! - [`diagnostic_plots`]: histogram, boxplot and normal Q-Q plot of one numeric column
//! - [`plot_target_by_category`]: bar chart of a target's mean per category
//!
//! Both compute a summary first and then present a [`Figure`] to a [`Surface`],
//! which writes PNGs ([`PngSurface`]) or opens a window ([`ViewerSurface`]).

pub mod charts;
pub mod config;
pub mod data;
pub mod eda;
pub mod error;
pub mod gui;
pub mod stats;
pub mod surface;

pub use charts::Figure;
pub use config::PlotConfig;
pub use eda::{diagnose_numeric_columns, diagnostic_plots, plot_target_by_category};
pub use error::{EdaError, Result};
pub use surface::{PngSurface, Surface, ViewerSurface};
