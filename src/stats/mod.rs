//! Stats module - Summary computations behind the plots

mod calculator;

pub use calculator::{
    BoxSummary, DiagnosticSummary, Histogram, LinearFit, QqPlot, StatsCalculator,
};
