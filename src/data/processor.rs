//! Data Processor Module
//! Column lookup, numeric extraction and per-category aggregation.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },
    #[error("Column '{column}' has non-numeric dtype {dtype}")]
    NotNumeric { column: String, dtype: String },
    #[error("Column '{column}' has no non-null values")]
    EmptyColumn { column: String },
    #[error("Column '{column}' contains non-finite values")]
    NonFinite { column: String },
}

/// Check whether a dtype holds plain numbers.
///
/// Booleans, strings, categoricals and temporal types are not numeric here; they are
/// rejected rather than coerced.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Round half to even at the given number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Mean of the target column for one category value.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMean {
    pub category: String,
    /// `None` when every target value in the category is null.
    pub mean: Option<f64>,
}

/// Per-category means of a target column, ready for the bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMeans {
    pub target: String,
    pub category: String,
    pub ylabel: String,
    pub rows: Vec<CategoryMean>,
}

impl CategoryMeans {
    /// Chart title: "{ylabel} by {category}".
    pub fn title(&self) -> String {
        format!("{} by {}", self.ylabel, self.category)
    }

    /// Mean for a category label, if that category exists and has one.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.category == category)
            .and_then(|row| row.mean)
    }

    /// Category labels in presentation order.
    pub fn categories(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.category.clone()).collect()
    }

    /// Smallest and largest mean, ignoring categories without one.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.mean)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Handles column extraction and aggregation.
pub struct DataProcessor;

impl DataProcessor {
    /// Look up a column, mapping an absent name to `ColumnNotFound`.
    pub fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        df.column(name).map_err(|_| ProcessorError::ColumnNotFound {
            column: name.to_string(),
        })
    }

    /// Look up a column and require a numeric dtype.
    pub fn numeric_column<'a>(
        df: &'a DataFrame,
        name: &str,
    ) -> Result<&'a Column, ProcessorError> {
        let column = Self::column(df, name)?;
        if !is_numeric_dtype(column.dtype()) {
            return Err(ProcessorError::NotNumeric {
                column: name.to_string(),
                dtype: column.dtype().to_string(),
            });
        }
        Ok(column)
    }

    /// Non-null values of a numeric column as f64, in row order.
    pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ProcessorError> {
        let column = Self::numeric_column(df, name)?;
        let value_f64 = column.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;
        Ok(value_ca.into_iter().flatten().collect())
    }

    /// Values for the diagnostic plots: non-null, non-empty and all finite.
    pub fn diagnostic_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ProcessorError> {
        let values = Self::numeric_values(df, name)?;
        if values.is_empty() {
            return Err(ProcessorError::EmptyColumn {
                column: name.to_string(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ProcessorError::NonFinite {
                column: name.to_string(),
            });
        }
        Ok(values)
    }

    /// Mean of `target` within each distinct non-null value of `category`.
    ///
    /// Means are rounded to `decimals` places. Rows come back sorted by the category
    /// column so repeated calls render identically.
    pub fn category_means(
        df: &DataFrame,
        target: &str,
        category: &str,
        ylabel: &str,
        decimals: u32,
    ) -> Result<CategoryMeans, ProcessorError> {
        Self::numeric_column(df, target)?;
        Self::column(df, category)?;

        let grouped = df
            .clone()
            .lazy()
            .filter(col(category).is_not_null())
            .group_by([col(category)])
            .agg([col(target)
                .cast(DataType::Float64)
                .fill_nan(lit(NULL))
                .mean()
                .alias("__mean")])
            .sort([category], SortMultipleOptions::default())
            .collect()?;

        let keys = grouped.column(category)?.cast(&DataType::String)?;
        let keys = keys.str()?;
        let means = grouped.column("__mean")?.f64()?;

        let rows: Vec<CategoryMean> = keys
            .into_iter()
            .zip(means.into_iter())
            .map(|(key, mean)| CategoryMean {
                category: key.unwrap_or_default().to_string(),
                mean: mean.filter(|m| !m.is_nan()).map(|m| round_to(m, decimals)),
            })
            .collect();

        log::debug!(
            "Aggregated '{}' over {} categories of '{}'",
            target,
            rows.len(),
            category
        );

        Ok(CategoryMeans {
            target: target.to_string(),
            category: category.to_string(),
            ylabel: ylabel.to_string(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_means_half_split() {
        let df = df!(
            "target" => [0i64, 1, 1, 0],
            "category" => ["a", "a", "b", "b"],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Rate", 2).unwrap();
        assert_eq!(means.categories(), vec!["a", "b"]);
        assert_eq!(means.get("a"), Some(0.5));
        assert_eq!(means.get("b"), Some(0.5));
        assert_eq!(means.title(), "Rate by category");
    }

    #[test]
    fn test_category_means_uneven_groups() {
        let df = df!(
            "target" => [1.0, 2.0, 3.0],
            "category" => ["x", "x", "y"],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        assert_eq!(means.get("x"), Some(1.5));
        assert_eq!(means.get("y"), Some(3.0));
    }

    #[test]
    fn test_category_means_rounds_to_two_places() {
        let df = df!(
            "target" => [1.0, 0.0, 0.0],
            "category" => ["k", "k", "k"],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        assert_eq!(means.get("k"), Some(0.33));
    }

    #[test]
    fn test_category_means_skips_null_categories_and_targets() {
        let df = df!(
            "target" => [Some(2.0), None, Some(4.0), Some(10.0), None],
            "category" => [Some("p"), Some("p"), Some("q"), None, Some("r")],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        assert_eq!(means.categories(), vec!["p", "q", "r"]);
        assert_eq!(means.get("p"), Some(2.0));
        assert_eq!(means.get("q"), Some(4.0));
        assert_eq!(means.rows[2].mean, None);
        assert_eq!(means.value_range(), Some((2.0, 4.0)));
    }

    #[test]
    fn test_numeric_category_keys() {
        let df = df!(
            "target" => [1.0, 3.0, 5.0],
            "seniors" => [0i32, 1, 1],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "seniors", "Mean", 2).unwrap();
        assert_eq!(means.categories(), vec!["0", "1"]);
        assert_eq!(means.get("1"), Some(4.0));
    }

    #[test]
    fn test_category_means_missing_columns() {
        let df = df!("target" => [1.0], "category" => ["a"]).unwrap();

        let err = DataProcessor::category_means(&df, "nope", "category", "", 2).unwrap_err();
        assert!(matches!(err, ProcessorError::ColumnNotFound { ref column } if column == "nope"));

        let err = DataProcessor::category_means(&df, "target", "nope", "", 2).unwrap_err();
        assert!(matches!(err, ProcessorError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_category_means_rejects_text_target() {
        let df = df!("target" => ["1", "2"], "category" => ["a", "b"]).unwrap();
        let err = DataProcessor::category_means(&df, "target", "category", "", 2).unwrap_err();
        assert!(matches!(err, ProcessorError::NotNumeric { .. }));
    }

    #[test]
    fn test_category_means_deterministic() {
        let df = df!(
            "target" => [3.0, 1.0, 4.0, 1.0, 5.0, 9.0],
            "category" => ["c", "a", "b", "a", "c", "b"],
        )
        .unwrap();

        let first = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        for _ in 0..5 {
            let again =
                DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_numeric_values_drops_nulls() {
        let df = df!("x" => [Some(1i64), None, Some(3)]).unwrap();
        assert_eq!(DataProcessor::numeric_values(&df, "x").unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_boolean_column_is_not_numeric() {
        let df = df!("flag" => [true, false]).unwrap();
        let err = DataProcessor::numeric_values(&df, "flag").unwrap_err();
        assert!(matches!(err, ProcessorError::NotNumeric { .. }));
    }

    #[test]
    fn test_diagnostic_values_rejects_empty_and_non_finite() {
        let df = df!(
            "empty" => [None::<f64>, None],
            "inf" => [Some(1.0), Some(f64::INFINITY)],
        )
        .unwrap();

        assert!(matches!(
            DataProcessor::diagnostic_values(&df, "empty"),
            Err(ProcessorError::EmptyColumn { .. })
        ));
        assert!(matches!(
            DataProcessor::diagnostic_values(&df, "inf"),
            Err(ProcessorError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_category_means_ties_round_to_even() {
        let df = df!(
            "target" => [0.0, 0.25, 0.5, 0.75],
            "category" => ["a", "a", "b", "b"],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        assert_eq!(means.get("a"), Some(0.12));
        assert_eq!(means.get("b"), Some(0.62));
    }

    #[test]
    fn test_category_means_skips_nan_targets() {
        let df = df!(
            "target" => [1.0, f64::NAN, 3.0],
            "category" => ["a", "a", "b"],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        assert_eq!(means.get("a"), Some(1.0));
        assert_eq!(means.get("b"), Some(3.0));
    }

    #[test]
    fn test_category_labels_keep_quotes() {
        let df = df!(
            "target" => [1.0, 2.0],
            "category" => ["5\"", "\"x\""],
        )
        .unwrap();

        let means = DataProcessor::category_means(&df, "target", "category", "Mean", 2).unwrap();
        let mut labels = means.categories();
        labels.sort();
        assert_eq!(labels, vec!["\"x\"".to_string(), "5\"".to_string()]);
        assert_eq!(means.get("5\""), Some(1.0));
        assert_eq!(means.get("\"x\""), Some(2.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.625, 2), 0.62);
        assert_eq!(round_to(0.135, 1), 0.1);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(-1.234, 1), -1.2);
        assert_eq!(round_to(7.0, 0), 7.0);
    }
}
