//! Control Panel Widget
//! Left side panel with data source, category multi-select and exports.

use crate::data::Selection;
use egui::{Color32, RichText, ScrollArea};

/// Left side control panel.
pub struct ControlPanel {
    /// Categories in display order with their colors.
    pub categories: Vec<(String, Color32)>,
    pub source_label: String,
    pub record_count: usize,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            source_label: String::new(),
            record_count: 0,
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available categories after a dataset load
    pub fn update_categories(&mut self, categories: Vec<(String, [u8; 3])>) {
        self.categories = categories
            .into_iter()
            .map(|(name, [r, g, b])| (name, Color32::from_rgb(r, g, b)))
            .collect();
    }

    pub fn set_source(&mut self, label: String, record_count: usize) {
        self.source_label = label;
        self.record_count = record_count;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel. Selection edits are applied in place.
    pub fn show(&mut self, ui: &mut egui::Ui, selection: &mut Selection) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Market Value")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Filters & display")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.source_label).size(12.0));
                ui.label(
                    RichText::new(format!("{} records", self.record_count))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.is_loading, |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseDataset;
                        }
                        if ui.button("↺ Built-in").clicked() {
                            action = ControlPanelAction::UseBuiltin;
                        }
                    });
                    if self.is_loading {
                        ui.spinner();
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Category Multi-select =====
        ui.label(RichText::new("🏷 Categories to compare").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for (category, color) in &self.categories {
                        ui.horizontal(|ui| {
                            let mut checked = selection.contains(category);
                            if ui.checkbox(&mut checked, "").changed() {
                                selection.set(category, checked);
                                action = ControlPanelAction::SelectionChanged;
                            }
                            let (rect, _) = ui
                                .allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 3.0, *color);
                            ui.label(RichText::new(category).size(13.0));
                        });
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                *selection = Selection::all(self.categories.iter().map(|(c, _)| c.clone()));
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                selection.clear();
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!selection.is_empty(), |ui| {
                let png_button = egui::Button::new(RichText::new("🖼 Chart as PNG").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }

                ui.add_space(6.0);

                let csv_button = egui::Button::new(RichText::new("📄 Table as CSV").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(csv_button).clicked() {
                    action = ControlPanelAction::ExportCsv;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") || self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseDataset,
    UseBuiltin,
    SelectionChanged,
    ExportPng,
    ExportCsv,
}
