//! Criterion Results Loader
//! Builds chart series from a Criterion output directory.
//!
//! Criterion stores one estimate file per benchmark input at
//! `<root>/<group>/<parameter>/new/estimates.json`, with times in nanoseconds.
//! Each chart series is one benchmark group; categories are the parameters.

use crate::charts::{ChartData, Series};
use crate::config::ChartConfig;
use crate::data::processor::{align_series, ProcessorError};
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CriterionError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid series spec {0:?}, expected NAME=GROUP")]
    InvalidSpec(String),
    #[error("No series requested")]
    NoSeries,
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Which Criterion estimate becomes the bar height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Statistic {
    #[default]
    Mean,
    Median,
}

/// Time unit of the plotted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimeUnit {
    Ns,
    Us,
    #[default]
    Ms,
    S,
}

impl TimeUnit {
    pub fn from_nanos(self, nanos: f64) -> f64 {
        match self {
            TimeUnit::Ns => nanos,
            TimeUnit::Us => nanos / 1e3,
            TimeUnit::Ms => nanos / 1e6,
            TimeUnit::S => nanos / 1e9,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "µs",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "s",
        }
    }
}

/// One chart series backed by one Criterion benchmark group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    pub name: String,
    pub group: String,
}

impl FromStr for SeriesSpec {
    type Err = CriterionError;

    /// `RBTree=Red_Black_Tree_insert`, or just the group name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, group) = match s.split_once('=') {
            Some((name, group)) => (name.trim(), group.trim()),
            None => (s.trim(), s.trim()),
        };
        if name.is_empty() || group.is_empty() {
            return Err(CriterionError::InvalidSpec(s.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            group: group.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Estimates {
    mean: Estimate,
    median: Estimate,
}

#[derive(Debug, Deserialize)]
struct Estimate {
    point_estimate: f64,
}

pub struct CriterionLoader {
    pub root: PathBuf,
    pub statistic: Statistic,
    pub unit: TimeUnit,
}

impl CriterionLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            statistic: Statistic::default(),
            unit: TimeUnit::default(),
        }
    }

    /// Load every requested group; a group with no results yields an empty series.
    pub fn load(
        &self,
        specs: &[SeriesSpec],
        config: &ChartConfig,
    ) -> Result<ChartData, CriterionError> {
        if specs.is_empty() {
            return Err(CriterionError::NoSeries);
        }

        let mut per_group = Vec::with_capacity(specs.len());
        for spec in specs {
            per_group.push(self.load_group(&spec.group)?);
        }

        let mut categories: Vec<String> = Vec::new();
        for values in &per_group {
            for param in values.keys() {
                if !categories.contains(param) {
                    categories.push(param.clone());
                }
            }
        }
        sort_parameters(&mut categories);

        let mut series = Vec::with_capacity(specs.len());
        for (i, (spec, values)) in specs.iter().zip(&per_group).enumerate() {
            let values = align_series(&spec.name, &categories, values)?;
            series.push(Series::new(spec.name.clone(), config.series_color(i), values));
        }

        let mut data = ChartData::new(categories, series);
        data.y_label = Some(format!("Time ({})", self.unit.suffix()));
        Ok(data)
    }

    /// Parameter name to converted estimate, for one benchmark group.
    fn load_group(&self, group: &str) -> Result<HashMap<String, f64>, CriterionError> {
        let group_dir = self.root.join(group);
        if !group_dir.is_dir() {
            warn!(group, path = %group_dir.display(), "no criterion results for group");
            return Ok(HashMap::new());
        }

        let entries = std::fs::read_dir(&group_dir).map_err(|source| CriterionError::Io {
            path: group_dir.clone(),
            source,
        })?;

        let mut params = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CriterionError::Io {
                path: group_dir.clone(),
                source,
            })?;
            let estimates = entry.path().join("new").join("estimates.json");
            if estimates.is_file() {
                params.push((entry.file_name().to_string_lossy().into_owned(), estimates));
            }
        }

        let values = params
            .par_iter()
            .map(|(param, path)| -> Result<(String, f64), CriterionError> {
                let nanos = self.read_estimate(path)?;
                Ok((param.clone(), self.unit.from_nanos(nanos)))
            })
            .collect::<Result<HashMap<_, _>, CriterionError>>()?;

        debug!(group, inputs = values.len(), "loaded criterion group");
        Ok(values)
    }

    fn read_estimate(&self, path: &Path) -> Result<f64, CriterionError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CriterionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let estimates: Estimates =
            serde_json::from_str(&raw).map_err(|source| CriterionError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(match self.statistic {
            Statistic::Mean => estimates.mean.point_estimate,
            Statistic::Median => estimates.median.point_estimate,
        })
    }
}

/// Numeric parameters sort by value, anything else lexicographically after them.
fn sort_parameters(params: &mut [String]) {
    params.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}
