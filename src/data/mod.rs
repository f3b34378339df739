//! Data module - benchmark table loading and processing

mod criterion;
mod loader;
mod processor;

pub use criterion::{CriterionError, CriterionLoader, SeriesSpec, Statistic, TimeUnit};
pub use loader::DataLoader;
pub use processor::{DataLayout, DataProcessor, ProcessorError};
