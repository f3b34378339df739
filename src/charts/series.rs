//! Chart input model: categories and named value series.

use crate::charts::SeriesColor;

/// One named, colored sequence of values plotted across shared categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: SeriesColor,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: SeriesColor, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
        }
    }
}

/// Everything needed to draw one grouped bar chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Overrides the configured title when set
    pub title: Option<String>,
    /// Overrides the configured y-axis label when set
    pub y_label: Option<String>,
}

impl ChartData {
    pub fn new(categories: Vec<String>, series: Vec<Series>) -> Self {
        Self {
            categories,
            series,
            title: None,
            y_label: None,
        }
    }

    /// Red-black vs AVL insertion timings; the AVL run was never recorded.
    pub fn sample() -> Self {
        let categories = ["10000", "40000", "70000", "100000", "130000"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self::new(
            categories,
            vec![
                Series::new(
                    "RBTree",
                    SeriesColor::RED,
                    vec![1.0642, 5.9522, 11.708, 18.242, 25.206],
                ),
                Series::new("AVL", SeriesColor::YELLOW, Vec::new()),
            ],
        )
    }

    pub fn total_values(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).sum()
    }
}
