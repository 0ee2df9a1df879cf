//! Data module - CSV loading, column checks and aggregation

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{
    is_numeric_dtype, round_to, CategoryMean, CategoryMeans, DataProcessor, ProcessorError,
};
