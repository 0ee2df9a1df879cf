//! CSV Data Loader Module
//! Loads the dataset from CSV and lists its columns using Polars.

use super::processor::is_numeric_dtype;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&DataFrame, LoaderError> {
        let file_path = file_path.as_ref();

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .finish()?
            .collect()?;

        log::info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Column names paired with their dtype names.
    pub fn get_column_dtypes(&self) -> Vec<(String, DataType)> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.dtype().clone()))
            .collect()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Result<&DataFrame, LoaderError> {
        self.df.as_ref().ok_or(LoaderError::NoData)
    }
}
