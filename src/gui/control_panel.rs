//! Control Panel Widget
//! Left side panel with dataset summary, display toggles and export buttons.

use crate::charts::{ChartData, ChartPlotter, ImageFormat};
use egui::{Color32, RichText};

/// User settings that change how the figure is drawn
#[derive(Clone)]
pub struct UserSettings {
    pub show_value_labels: bool,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
}

/// What the user asked for in this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    SettingsChanged,
    Export(ImageFormat),
}

impl ControlPanel {
    pub fn new(show_value_labels: bool) -> Self {
        Self {
            settings: UserSettings { show_value_labels },
            status: "Ready".to_string(),
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, data: &ChartData) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Bench Chart")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("{} categories", data.categories.len())).size(12.0),
                );
                ui.add_space(4.0);
                for series in &data.series {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                        ui.painter()
                            .rect_filled(rect, 3.0, ChartPlotter::to_color32(series.color));

                        let count = series.values.len();
                        let text = if count == 0 {
                            format!("{} (no data)", series.name)
                        } else {
                            format!("{} ({} values)", series.name, count)
                        };
                        let color = if count == 0 {
                            Color32::GRAY
                        } else {
                            ui.visuals().text_color()
                        };
                        ui.label(RichText::new(text).size(12.0).color(color));
                    });
                }
            });

        ui.add_space(10.0);

        // ===== Display Section =====
        ui.label(RichText::new("⚙ Display").size(14.0).strong());
        ui.add_space(5.0);
        if ui
            .checkbox(&mut self.settings.show_value_labels, "Show value labels")
            .changed()
        {
            action = ControlPanelAction::SettingsChanged;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Export Section =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("Export PNG…").clicked() {
                action = ControlPanelAction::Export(ImageFormat::Png);
            }
            if ui.button("Export SVG…").clicked() {
                action = ControlPanelAction::Export(ImageFormat::Svg);
            }
        });

        ui.add_space(10.0);
        ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));

        action
    }
}
