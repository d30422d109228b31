use eframe::egui;
use std::path::PathBuf;

use crate::config::{Config, PAGE_SIZES};
use crate::models::ViewMode;

#[derive(Debug)]
pub enum SettingsDialogEvent {
    DefaultsChanged,
    LoadCatalog(PathBuf),
    UseBuiltinCatalog,
    Close,
}

pub struct SettingsDialog;

impl SettingsDialog {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        config: &mut Config,
        catalog_path_input: &mut String,
    ) -> Option<SettingsDialogEvent> {
        let mut event = None;

        egui::Window::new("Settings")
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.heading("New tab defaults");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Page size:");
                    for size in PAGE_SIZES {
                        let is_selected = config.default_page_size == size;
                        if ui.selectable_label(is_selected, format!("{}", size)).clicked() {
                            config.default_page_size = size;
                            event = Some(SettingsDialogEvent::DefaultsChanged);
                        }
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("View:");
                    for mode in [ViewMode::Table, ViewMode::Cards] {
                        let is_selected = config.default_view_mode == mode;
                        if ui.selectable_label(is_selected, mode.label()).clicked() {
                            config.default_view_mode = mode;
                            event = Some(SettingsDialogEvent::DefaultsChanged);
                        }
                    }
                });

                ui.add_space(8.0);
                ui.heading("Catalog");
                ui.separator();

                match &config.catalog_path {
                    Some(path) => {
                        ui.label(format!("Current: {}", path.display()));
                    }
                    None => {
                        ui.label("Current: built-in catalog");
                    }
                }

                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(catalog_path_input)
                            .hint_text("/path/to/catalog.json")
                            .desired_width(260.0),
                    );
                    if ui.button("Load").clicked() && !catalog_path_input.trim().is_empty() {
                        event = Some(SettingsDialogEvent::LoadCatalog(PathBuf::from(
                            catalog_path_input.trim(),
                        )));
                    }
                });

                if config.catalog_path.is_some() {
                    if ui.button("Use built-in catalog").clicked() {
                        event = Some(SettingsDialogEvent::UseBuiltinCatalog);
                    }
                }

                ui.separator();

                if ui.button("Close").clicked() {
                    event = Some(SettingsDialogEvent::Close);
                }
            });

        event
    }
}
