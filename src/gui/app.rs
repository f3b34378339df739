//! Bench Chart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartData, ChartRenderer, Figure, ImageFormat, StaticChartExporter};
use crate::config::ChartConfig;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use tracing::{error, info};

/// Main application window.
pub struct BenchChartApp {
    data: ChartData,
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl BenchChartApp {
    /// `figure` is the already rendered chart for `data` under `config`.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data: ChartData,
        config: ChartConfig,
        figure: Figure,
    ) -> Self {
        Self {
            control_panel: ControlPanel::new(config.show_value_labels),
            chart_viewer: ChartViewer::new(figure),
            data,
            config,
        }
    }

    /// Re-render the figure after a display setting changed
    fn handle_settings_changed(&mut self) {
        self.config.show_value_labels = self.control_panel.settings.show_value_labels;
        match ChartRenderer::from_config(&self.config).figure(&self.data) {
            Ok(figure) => {
                self.chart_viewer.set_figure(figure);
                self.control_panel.set_status("Ready");
            }
            Err(e) => {
                error!(error = %e, "failed to re-render chart");
                self.control_panel.set_status(format!("Render error: {}", e));
            }
        }
    }

    /// Handle export - ask for a path and write the current figure
    fn handle_export(&mut self, format: ImageFormat) {
        let (filter, extension) = match format {
            ImageFormat::Png => ("PNG Image", "png"),
            ImageFormat::Svg => ("SVG Image", "svg"),
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter(filter, &[extension])
            .set_file_name(format!("bench_chart.{}", extension))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let size = (self.config.width, self.config.height);
        match StaticChartExporter::save(&self.chart_viewer.figure, &output_path, size) {
            Ok(()) => {
                info!(path = %output_path.display(), "chart exported from viewer");
                self.control_panel
                    .set_status(format!("Exported {}", output_path.display()));
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_status(format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for BenchChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.data);

                    match action {
                        ControlPanelAction::SettingsChanged => self.handle_settings_changed(),
                        ControlPanelAction::Export(format) => self.handle_export(format),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
