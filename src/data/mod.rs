//! Data module - CSV loading, categorization and processing

mod category;
mod dataset;
mod loader;
mod processor;

pub use category::{categorize, CategorizedYear, Category, CategoryTally};
pub use dataset::{Dataset, RecordMap, SchemaError};
pub use loader::{DataLoader, LoadError};
pub use processor::{DataProcessor, RegionRecord};
