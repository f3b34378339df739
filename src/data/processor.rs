//! Data Processor Module
//! Turns loaded tables into categories and aligned value series.

use crate::charts::{ChartData, Series};
use crate::config::ChartConfig;
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Wide layout needs a category column")]
    MissingCategoryColumn,
    #[error("Long layout needs category, series and value columns, found {0}")]
    MissingLongColumns(usize),
    #[error("Series {series:?} has a gap: no value for {missing:?} but a value for {later:?}")]
    GapInSeries {
        series: String,
        missing: String,
        later: String,
    },
    #[error("Category {0:?} appears in more than one row")]
    DuplicateCategory(String),
    #[error("Series {series:?} has two values for category {category:?}")]
    DuplicateValue { series: String, category: String },
}

/// Table layout of a CSV input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DataLayout {
    /// One row per category: `category, series_1, series_2, ...`
    #[default]
    Wide,
    /// One row per value: `category, series, value`
    Long,
}

/// Handles table to chart-data conversion.
pub struct DataProcessor;

impl DataProcessor {
    pub fn prepare_data(
        df: &DataFrame,
        layout: DataLayout,
        config: &ChartConfig,
    ) -> Result<ChartData, ProcessorError> {
        let data = match layout {
            DataLayout::Wide => Self::from_wide(df, config)?,
            DataLayout::Long => Self::from_long(df, config)?,
        };
        debug!(
            ?layout,
            categories = data.categories.len(),
            series = data.series.len(),
            "prepared chart data"
        );
        Ok(data)
    }

    /// First column holds categories, every other column is one series.
    ///
    /// Trailing empty cells shorten a series; an empty cell followed by a value is an error.
    pub fn from_wide(df: &DataFrame, config: &ChartConfig) -> Result<ChartData, ProcessorError> {
        let columns = df.get_columns();
        let (category_col, value_cols) = columns
            .split_first()
            .ok_or(ProcessorError::MissingCategoryColumn)?;

        let categories = Self::string_values(category_col)?;
        let mut seen = HashSet::with_capacity(categories.len());
        if let Some(repeated) = categories.iter().find(|&c| !seen.insert(c.as_str())) {
            return Err(ProcessorError::DuplicateCategory(repeated.clone()));
        }

        let mut series = Vec::with_capacity(value_cols.len());
        for (i, col) in value_cols.iter().enumerate() {
            let name = col.name().to_string();
            let cells = Self::float_values(col)?;

            let mut by_category = HashMap::new();
            for (category, value) in categories.iter().zip(cells) {
                if let Some(v) = value {
                    by_category.insert(category.clone(), v);
                }
            }
            let values = align_series(&name, &categories, &by_category)?;
            series.push(Series::new(name, config.series_color(i), values));
        }

        Ok(ChartData::new(categories, series))
    }

    /// Rows of `category, series, value`; categories and series keep first-seen order.
    pub fn from_long(df: &DataFrame, config: &ChartConfig) -> Result<ChartData, ProcessorError> {
        let columns = df.get_columns();
        if columns.len() < 3 {
            return Err(ProcessorError::MissingLongColumns(columns.len()));
        }

        let category_cells = Self::string_values(&columns[0])?;
        let series_cells = Self::string_values(&columns[1])?;
        let value_cells = Self::float_values(&columns[2])?;

        let mut categories: Vec<String> = Vec::new();
        let mut series_names: Vec<String> = Vec::new();
        let mut by_series: HashMap<String, HashMap<String, f64>> = HashMap::new();

        for ((category, name), value) in category_cells
            .into_iter()
            .zip(series_cells)
            .zip(value_cells)
        {
            if !categories.contains(&category) {
                categories.push(category.clone());
            }
            if !series_names.contains(&name) {
                series_names.push(name.clone());
            }
            let Some(value) = value else {
                continue;
            };
            let values = by_series.entry(name.clone()).or_default();
            if values.insert(category.clone(), value).is_some() {
                return Err(ProcessorError::DuplicateValue {
                    series: name,
                    category,
                });
            }
        }

        let empty = HashMap::new();
        let mut series = Vec::with_capacity(series_names.len());
        for (i, name) in series_names.into_iter().enumerate() {
            let by_category = by_series.get(&name).unwrap_or(&empty);
            let values = align_series(&name, &categories, by_category)?;
            series.push(Series::new(name, config.series_color(i), values));
        }

        Ok(ChartData::new(categories, series))
    }

    fn string_values(col: &Column) -> Result<Vec<String>, ProcessorError> {
        let as_str = col.cast(&DataType::String)?;
        let ca = as_str.str()?;
        Ok(ca
            .into_iter()
            .map(|v| v.unwrap_or_default().trim_matches('"').to_string())
            .collect())
    }

    fn float_values(col: &Column) -> Result<Vec<Option<f64>>, ProcessorError> {
        let as_f64 = col.cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;
        Ok(ca
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }
}

/// Values of one series in category order.
///
/// The series ends at the first category without a value; any value after that
/// would misalign every later bar, so it is rejected.
pub fn align_series(
    name: &str,
    categories: &[String],
    by_category: &HashMap<String, f64>,
) -> Result<Vec<f64>, ProcessorError> {
    let mut values = Vec::with_capacity(categories.len());
    let mut missing: Option<&String> = None;

    for category in categories {
        match (by_category.get(category), missing) {
            (Some(_), Some(gap)) => {
                return Err(ProcessorError::GapInSeries {
                    series: name.to_string(),
                    missing: gap.clone(),
                    later: category.clone(),
                });
            }
            (Some(&v), None) => values.push(v),
            (None, None) => missing = Some(category),
            (None, Some(_)) => {}
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::SeriesColor;

    fn sizes() -> Column {
        Column::new("size".into(), vec![10000i64, 40000, 70000])
    }

    #[test]
    fn wide_layout_builds_one_series_per_column() {
        let df = DataFrame::new(vec![
            sizes(),
            Column::new("RBTree".into(), vec![Some(1.0642), Some(5.9522), Some(11.708)]),
            Column::new("AVL".into(), vec![None::<f64>, None, None]),
        ])
        .unwrap();

        let data = DataProcessor::from_wide(&df, &ChartConfig::default()).unwrap();
        assert_eq!(data.categories, ["10000", "40000", "70000"]);
        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[0].name, "RBTree");
        assert_eq!(data.series[0].values, [1.0642, 5.9522, 11.708]);
        assert!(data.series[1].values.is_empty());
        assert_eq!(data.series[0].color, SeriesColor::from_palette(0));
    }

    #[test]
    fn wide_layout_keeps_prefix_before_trailing_blanks() {
        let df = DataFrame::new(vec![
            sizes(),
            Column::new("AVL".into(), vec![Some(0.9), Some(f64::NAN), None]),
        ])
        .unwrap();

        let data = DataProcessor::from_wide(&df, &ChartConfig::default()).unwrap();
        assert_eq!(data.series[0].values, [0.9]);
    }

    #[test]
    fn wide_layout_rejects_gaps() {
        let df = DataFrame::new(vec![
            sizes(),
            Column::new("AVL".into(), vec![Some(1.0), None, Some(3.0)]),
        ])
        .unwrap();

        let err = DataProcessor::from_wide(&df, &ChartConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::GapInSeries { ref missing, ref later, .. }
                if missing == "40000" && later == "70000"
        ));
    }

    #[test]
    fn wide_layout_rejects_repeated_categories() {
        let df = DataFrame::new(vec![
            Column::new("size".into(), vec![10000i64, 10000]),
            Column::new("RBTree".into(), vec![1.0, 2.0]),
        ])
        .unwrap();

        let err = DataProcessor::from_wide(&df, &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ProcessorError::DuplicateCategory(ref c) if c == "10000"));

        let blank_repeat = DataFrame::new(vec![
            Column::new("size".into(), vec![10000i64, 10000]),
            Column::new("RBTree".into(), vec![Some(1.0), None]),
        ])
        .unwrap();
        assert!(matches!(
            DataProcessor::from_wide(&blank_repeat, &ChartConfig::default()),
            Err(ProcessorError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn long_layout_pivots_in_first_seen_order() {
        let df = DataFrame::new(vec![
            Column::new("size".into(), vec!["10000", "10000", "40000", "40000"]),
            Column::new("tree".into(), vec!["RBTree", "AVL", "RBTree", "AVL"]),
            Column::new("ms".into(), vec![1.0, 0.8, 5.9, 4.4]),
        ])
        .unwrap();

        let config = ChartConfig {
            palette: vec![SeriesColor::RED, SeriesColor::YELLOW],
            ..ChartConfig::default()
        };
        let data = DataProcessor::prepare_data(&df, DataLayout::Long, &config).unwrap();
        assert_eq!(data.categories, ["10000", "40000"]);
        assert_eq!(data.series[0].name, "RBTree");
        assert_eq!(data.series[0].values, [1.0, 5.9]);
        assert_eq!(data.series[1].values, [0.8, 4.4]);
        assert_eq!(data.series[1].color, SeriesColor::YELLOW);
    }

    #[test]
    fn long_layout_series_without_values_is_empty() {
        let df = DataFrame::new(vec![
            Column::new("size".into(), vec!["10000", "10000"]),
            Column::new("tree".into(), vec!["RBTree", "AVL"]),
            Column::new("ms".into(), vec![Some(1.0), None]),
        ])
        .unwrap();

        let data = DataProcessor::from_long(&df, &ChartConfig::default()).unwrap();
        assert_eq!(data.series[1].name, "AVL");
        assert!(data.series[1].values.is_empty());
    }

    #[test]
    fn long_layout_rejects_duplicates_and_narrow_tables() {
        let df = DataFrame::new(vec![
            Column::new("size".into(), vec!["10000", "10000"]),
            Column::new("tree".into(), vec!["RBTree", "RBTree"]),
            Column::new("ms".into(), vec![1.0, 1.1]),
        ])
        .unwrap();
        assert!(matches!(
            DataProcessor::from_long(&df, &ChartConfig::default()),
            Err(ProcessorError::DuplicateValue { .. })
        ));

        let narrow = DataFrame::new(vec![sizes()]).unwrap();
        assert!(matches!(
            DataProcessor::from_long(&narrow, &ChartConfig::default()),
            Err(ProcessorError::MissingLongColumns(1))
        ));
    }

    #[test]
    fn align_series_stops_at_first_missing_category() {
        let categories: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let values = HashMap::from([("a".to_string(), 1.0)]);
        assert_eq!(align_series("s", &categories, &values).unwrap(), [1.0]);
    }
}
