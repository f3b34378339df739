//! Chart Viewer Widget
//! Central panel displaying the rendered figure.

use crate::charts::{ChartPlotter, Figure};
use egui::RichText;

/// Minimum plot height in points
const MIN_PLOT_HEIGHT: f32 = 300.0;

pub struct ChartViewer {
    pub figure: Figure,
}

impl ChartViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    pub fn set_figure(&mut self, figure: Figure) {
        self.figure = figure;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.figure.bar_groups.is_empty() && self.figure.x_ticks.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        // Leave room for the title row above the plot
        let height = (ui.available_height() - 40.0).max(MIN_PLOT_HEIGHT);
        ChartPlotter::draw_figure(ui, &self.figure, height);
    }
}
