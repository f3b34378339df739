//! Grouped Bar Chart Renderer
//! Paints categories and series onto a drawing surface and labels each bar.

use crate::charts::figure::{Bar, DrawingSurface, Figure, FigureError, TextAnchor};
use crate::charts::{ChartData, Series};
use crate::config::ChartConfig;
use tracing::{debug, trace};

/// Draws grouped bar charts with value labels.
pub struct ChartRenderer {
    pub title: String,
    pub y_label: String,
    pub bar_width: f64,
    pub show_value_labels: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl ChartRenderer {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            title: config.title.clone(),
            y_label: config.y_label.clone(),
            bar_width: config.bar_width,
            show_value_labels: config.show_value_labels,
        }
    }

    /// Fresh figure for `data`. A title or y label carried by the data wins.
    pub fn figure(&self, data: &ChartData) -> Result<Figure, FigureError> {
        let mut figure = Figure::new();
        self.render(&mut figure, &data.categories, &data.series)?;
        if let Some(title) = &data.title {
            figure.set_title(title);
        }
        if let Some(label) = &data.y_label {
            figure.set_y_label(label);
        }
        Ok(figure)
    }

    /// Draw every series side by side per category.
    ///
    /// Series `i` puts its bar for category `j` at `j + i * bar_width`. Value
    /// lengths are not checked against `categories`.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        categories: &[String],
        series: &[Series],
    ) -> Result<(), FigureError> {
        debug!(
            categories = categories.len(),
            series = series.len(),
            "render grouped bar chart"
        );

        let mut drawn = Vec::with_capacity(series.len());
        for (i, s) in series.iter().enumerate() {
            let offset = i as f64 * self.bar_width;
            let positions: Vec<f64> = (0..s.values.len()).map(|j| j as f64 + offset).collect();
            let bars = surface.bar(&positions, &s.values, self.bar_width, s.color)?;
            trace!(series = %s.name, bars = bars.bars.len(), "drew series");
            drawn.push(bars);
        }

        surface.set_y_label(&self.y_label);
        surface.set_title(&self.title);

        let group_center = series.len().saturating_sub(1) as f64 * self.bar_width / 2.0;
        let ticks: Vec<f64> = (0..categories.len())
            .map(|j| j as f64 + group_center)
            .collect();
        surface.set_x_ticks(&ticks, categories)?;

        let handles: Vec<_> = drawn.iter().map(|d| d.id).collect();
        let names: Vec<String> = series.iter().map(|s| s.name.clone()).collect();
        surface.legend(&handles, &names)?;

        if self.show_value_labels {
            for bars in &drawn {
                autolabel(surface, &bars.bars);
            }
        }
        Ok(())
    }
}

/// Attach a text label above each bar displaying its truncated height.
pub fn autolabel<S: DrawingSurface + ?Sized>(surface: &mut S, bars: &[Bar]) {
    for bar in bars {
        surface.text(
            bar.center(),
            bar.height,
            value_label(bar.height),
            TextAnchor::CenterBottom,
        );
    }
}

/// Integer part of `height`, truncated toward zero.
pub fn value_label(height: f64) -> String {
    let whole = height.trunc();
    // -0.4 truncates to -0.0
    if whole == 0.0 {
        "0".to_string()
    } else {
        format!("{whole:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::SeriesColor;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn bar(x: f64, width: f64, height: f64) -> Bar {
        Bar { x, width, height }
    }

    #[test]
    fn value_label_truncates_toward_zero() {
        assert_eq!(value_label(1.0642), "1");
        assert_eq!(value_label(25.206), "25");
        assert_eq!(value_label(0.0), "0");
        assert_eq!(value_label(11.999), "11");
        assert_eq!(value_label(-2.7), "-2");
        assert_eq!(value_label(-0.4), "0");
    }

    #[test]
    fn value_label_keeps_integers_beyond_i64() {
        assert_eq!(value_label(1e19), "10000000000000000000");
        assert_eq!(value_label(-1e19), "-10000000000000000000");
        assert_eq!(value_label(f64::NAN), "NaN");
        assert_eq!(value_label(f64::INFINITY), "inf");
    }

    #[test]
    fn autolabel_on_empty_bars_adds_nothing() {
        let mut fig = Figure::new();
        autolabel(&mut fig, &[]);
        assert!(fig.labels.is_empty());
    }

    #[test]
    fn autolabel_places_labels_in_bar_order() {
        let mut fig = Figure::new();
        let bars = [bar(0.0, 0.35, 5.9522), bar(1.0, 0.35, 0.0), bar(2.0, 0.5, -3.2)];
        autolabel(&mut fig, &bars);

        assert_eq!(fig.labels.len(), 3);
        let texts: Vec<&str> = fig.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["5", "0", "-3"]);

        let negative = &fig.labels[2];
        assert_eq!(negative.x, 2.25);
        assert_eq!(negative.y, -3.2);
        assert_eq!(negative.anchor, TextAnchor::CenterBottom);
    }

    #[test]
    fn render_sample_labels_first_series_only() {
        let data = ChartData::sample();
        let mut fig = Figure::new();
        ChartRenderer::default()
            .render(&mut fig, &data.categories, &data.series)
            .unwrap();

        assert_eq!(fig.bar_groups.len(), 2);
        assert_eq!(fig.bar_groups[0].bars.len(), 5);
        assert_eq!(fig.bar_groups[0].color, SeriesColor::RED);
        assert!(fig.bar_groups[1].bars.is_empty());
        assert_eq!(fig.bar_groups[1].color, SeriesColor::YELLOW);

        let texts: Vec<&str> = fig.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["1", "5", "11", "18", "25"]);

        for (label, bar) in fig.labels.iter().zip(&fig.bar_groups[0].bars) {
            assert_eq!(label.x, bar.x + bar.width / 2.0);
            assert_eq!(label.y, bar.height);
        }
    }

    #[test]
    fn render_sets_axes_ticks_and_legend() {
        let data = ChartData::sample();
        let mut fig = Figure::new();
        ChartRenderer::default()
            .render(&mut fig, &data.categories, &data.series)
            .unwrap();

        assert_eq!(fig.title.as_deref(), Some("Benchmark results Insertion"));
        assert_eq!(fig.y_label.as_deref(), Some("Time (ms)"));

        assert_eq!(fig.x_ticks.len(), 5);
        assert_eq!(fig.x_ticks[0].label, "10000");
        assert_relative_eq!(fig.x_ticks[0].position, 0.175);
        assert_relative_eq!(fig.x_ticks[4].position, 4.175);

        let names: Vec<&str> = fig.legend.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["RBTree", "AVL"]);
    }

    #[test]
    fn same_category_bars_sit_side_by_side() {
        let categories = vec!["a".to_string(), "b".to_string()];
        let series = vec![
            Series::new("one", SeriesColor::RED, vec![1.0, 2.0]),
            Series::new("two", SeriesColor::BLUE, vec![3.0, 4.0]),
            Series::new("three", SeriesColor::GREEN, vec![5.0, 6.0]),
        ];
        let mut fig = Figure::new();
        ChartRenderer::default()
            .render(&mut fig, &categories, &series)
            .unwrap();

        for j in 0..2 {
            let mut row: Vec<Bar> = fig.bar_groups.iter().map(|g| g.bars[j]).collect();
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            for pair in row.windows(2) {
                assert!(pair[0].x + pair[0].width <= pair[1].x + 1e-12);
            }
        }
        assert_relative_eq!(fig.x_ticks[1].position, 1.35);
        assert_eq!(fig.labels.len(), 6);
    }

    #[test]
    fn disabled_value_labels_draw_bars_only() {
        let data = ChartData::sample();
        let renderer = ChartRenderer {
            show_value_labels: false,
            ..ChartRenderer::default()
        };
        let mut fig = Figure::new();
        renderer
            .render(&mut fig, &data.categories, &data.series)
            .unwrap();

        assert_eq!(fig.bar_count(), 5);
        assert!(fig.labels.is_empty());
    }

    #[test]
    fn render_with_no_series_still_sets_ticks() {
        let categories = vec!["x".to_string()];
        let mut fig = Figure::new();
        ChartRenderer::default()
            .render(&mut fig, &categories, &[])
            .unwrap();

        assert!(fig.bar_groups.is_empty());
        assert!(fig.legend.is_empty());
        assert_eq!(fig.x_ticks[0].position, 0.0);
    }

    #[test]
    fn render_propagates_surface_errors() {
        let categories = vec!["x".to_string()];
        let series = vec![Series::new("s", SeriesColor::RED, vec![1.0])];
        let renderer = ChartRenderer {
            bar_width: -1.0,
            ..ChartRenderer::default()
        };
        let mut fig = Figure::new();
        assert_eq!(
            renderer.render(&mut fig, &categories, &series),
            Err(FigureError::InvalidBarWidth(-1.0))
        );
    }

    #[test]
    fn figure_prefers_data_title_and_y_label() {
        let mut data = ChartData::sample();
        data.y_label = Some("Time (µs)".to_string());
        let fig = ChartRenderer::default().figure(&data).unwrap();

        assert_eq!(fig.title.as_deref(), Some("Benchmark results Insertion"));
        assert_eq!(fig.y_label.as_deref(), Some("Time (µs)"));
        assert_eq!(fig.legend_name(fig.legend[0].group), Some("RBTree"));
    }

    proptest! {
        #[test]
        fn every_bar_gets_one_centred_label(
            bars in prop::collection::vec(
                (-1_000.0f64..1_000.0, 0.01f64..10.0, -1_000.0f64..1_000.0),
                0..32,
            )
        ) {
            let bars: Vec<Bar> = bars.into_iter().map(|(x, w, h)| bar(x, w, h)).collect();
            let mut fig = Figure::new();
            autolabel(&mut fig, &bars);

            prop_assert_eq!(fig.labels.len(), bars.len());
            for (label, b) in fig.labels.iter().zip(&bars) {
                prop_assert_eq!(label.x, b.x + b.width / 2.0);
                prop_assert_eq!(label.y, b.height);
                prop_assert_eq!(&label.text, &(b.height.trunc() as i64).to_string());
                prop_assert_eq!(label.anchor, TextAnchor::CenterBottom);
            }
        }
    }
}
