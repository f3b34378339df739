//! Data Loader Module
//! Reads benchmark tables from CSV (via Polars) or JSON files.

use crate::charts::{ChartData, Series, SeriesColor};
use crate::config::ChartConfig;
use crate::data::{DataLayout, DataProcessor, ProcessorError};
use polars::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unsupported input format: {0} (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("Series {series:?} has {values} values but only {categories} categories")]
    SeriesTooLong {
        series: String,
        values: usize,
        categories: usize,
    },
}

#[derive(Debug, Deserialize)]
struct JsonChart {
    categories: Vec<String>,
    #[serde(default)]
    series: Vec<JsonSeries>,
    title: Option<String>,
    y_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonSeries {
    name: String,
    color: Option<SeriesColor>,
    #[serde(default)]
    values: Vec<f64>,
}

/// Loads chart data from files on disk.
pub struct DataLoader;

impl DataLoader {
    /// Pick a reader from the file extension.
    pub fn load(
        path: &Path,
        layout: DataLayout,
        config: &ChartConfig,
    ) -> Result<ChartData, LoaderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let data = match extension.as_deref() {
            Some("csv") => Self::load_csv(path, layout, config)?,
            Some("json") => Self::load_json(path, config)?,
            _ => return Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(
            path = %path.display(),
            categories = data.categories.len(),
            series = data.series.len(),
            values = data.total_values(),
            "loaded benchmark data"
        );
        Ok(data)
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(
        path: &Path,
        layout: DataLayout,
        config: &ChartConfig,
    ) -> Result<ChartData, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Ok(DataProcessor::prepare_data(&df, layout, config)?)
    }

    pub fn load_json(path: &Path, config: &ChartConfig) -> Result<ChartData, LoaderError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_json(&raw, config)
    }

    pub fn parse_json(raw: &str, config: &ChartConfig) -> Result<ChartData, LoaderError> {
        let chart: JsonChart = serde_json::from_str(raw)?;

        let mut series = Vec::with_capacity(chart.series.len());
        for (i, s) in chart.series.into_iter().enumerate() {
            if s.values.len() > chart.categories.len() {
                return Err(LoaderError::SeriesTooLong {
                    series: s.name,
                    values: s.values.len(),
                    categories: chart.categories.len(),
                });
            }
            let color = s.color.unwrap_or_else(|| config.series_color(i));
            series.push(Series::new(s.name, color, s.values));
        }

        Ok(ChartData {
            categories: chart.categories,
            series,
            title: chart.title,
            y_label: chart.y_label,
        })
    }
}
