//! Figure Module
//! A computed chart, independent of how it is drawn.

use crate::data::CategoryMeans;
use crate::stats::DiagnosticSummary;

/// One displayable chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Histogram, boxplot and Q-Q plot of one column.
    Diagnostics(DiagnosticSummary),
    /// Mean of a target per category.
    CategoryBars(CategoryMeans),
}

impl Figure {
    pub fn title(&self) -> String {
        match self {
            Figure::Diagnostics(summary) => format!("Diagnostics: {}", summary.variable),
            Figure::CategoryBars(means) => means.title(),
        }
    }

    /// File name stem for exported images.
    pub fn file_stem(&self) -> String {
        let raw = match self {
            Figure::Diagnostics(summary) => format!("diagnostics_{}", summary.variable),
            Figure::CategoryBars(means) => format!("{}_by_{}", means.target, means.category),
        };
        sanitize_file_stem(&raw)
    }
}

/// Replace anything outside `[A-Za-z0-9_-]` with an underscore.
pub fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "figure".to_string()
    } else {
        stem
    }
}
