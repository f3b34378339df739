//! Chart Plotter Module
//! Paints a `Figure` interactively using egui_plot.

use crate::charts::figure::{BarGroupId, Figure, TextAnchor, XTick};
use crate::charts::SeriesColor;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Text};

/// Creates interactive bar charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn to_color32(color: SeriesColor) -> Color32 {
        Color32::from_rgb(color.r, color.g, color.b)
    }

    /// egui anchor equivalent of a figure text anchor.
    pub fn to_align2(anchor: TextAnchor) -> Align2 {
        match anchor {
            TextAnchor::CenterBottom => Align2::CENTER_BOTTOM,
            TextAnchor::CenterTop => Align2::CENTER_TOP,
        }
    }

    /// Grid marks only at category ticks; the large step keeps every one visible.
    fn tick_marks(ticks: &[XTick]) -> Vec<GridMark> {
        ticks
            .iter()
            .map(|tick| GridMark {
                value: tick.position,
                step_size: 1.0,
            })
            .collect()
    }

    /// Draw the figure: title above, then bars, value labels and legend
    pub fn draw_figure(ui: &mut egui::Ui, figure: &Figure, height: f32) {
        if let Some(title) = &figure.title {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(title).size(18.0).strong());
            });
            ui.add_space(6.0);
        }

        let (x_min, x_max) = figure.x_range();
        let (y_min, y_max) = figure.y_range();

        let text_color = ui.visuals().text_color();
        let marks = Self::tick_marks(&figure.x_ticks);
        let x_ticks = figure.x_ticks.clone();

        let mut plot = Plot::new("bench_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max)
            .x_grid_spacer(move |_input| marks.clone())
            .x_axis_formatter(move |mark, _range| {
                x_ticks
                    .iter()
                    .find(|tick| (tick.position - mark.value).abs() < 1e-9)
                    .map(|tick| tick.label.clone())
                    .unwrap_or_default()
            });
        if let Some(label) = &figure.y_label {
            plot = plot.y_axis_label(label.clone());
        }

        plot.show(ui, |plot_ui| {
            for (i, group) in figure.bar_groups.iter().enumerate() {
                let color = Self::to_color32(group.color);
                let bars: Vec<Bar> = group
                    .bars
                    .iter()
                    .map(|bar| {
                        Bar::new(bar.center(), bar.height)
                            .width(bar.width)
                            .fill(color)
                    })
                    .collect();

                let mut chart = BarChart::new(bars).color(color);
                if let Some(name) = figure.legend_name(BarGroupId(i)) {
                    chart = chart.name(name);
                }
                plot_ui.bar_chart(chart);
            }

            for label in &figure.labels {
                plot_ui.text(
                    Text::new(PlotPoint::new(label.x, label.y), label.text.clone())
                        .anchor(Self::to_align2(label.anchor))
                        .color(text_color),
                );
            }
        });
    }
}
