use eframe::egui;

use crate::catalog::BarrierLevel;
use crate::models::{ViewMode, ViewState};

#[derive(Debug)]
pub enum FilterBarEvent {
    ViewChanged,
    ModeChanged,
}

pub struct FilterBar;

impl FilterBar {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        view: &mut ViewState,
        view_mode: &mut ViewMode,
        shown: usize,
        total: usize,
    ) -> Option<FilterBarEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            // Table/Cards toggle over the same view output
            for mode in [ViewMode::Table, ViewMode::Cards] {
                if ui
                    .selectable_label(*view_mode == mode, mode.label())
                    .clicked()
                    && *view_mode != mode
                {
                    *view_mode = mode;
                    event = Some(FilterBarEvent::ModeChanged);
                }
            }

            ui.separator();

            ui.label("Window:");
            let window_text = match view.filters.has_window {
                None => "All",
                Some(true) => "Has Window",
                Some(false) => "No Window",
            };
            egui::ComboBox::from_id_source("filter_window")
                .selected_text(window_text)
                .width(100.0)
                .show_ui(ui, |ui| {
                    for (value, text) in [(None, "All"), (Some(true), "Has Window"), (Some(false), "No Window")] {
                        if ui.selectable_value(&mut view.filters.has_window, value, text).clicked() {
                            event = Some(FilterBarEvent::ViewChanged);
                        }
                    }
                });

            ui.label("Kraft:");
            let kraft_text = match view.filters.has_kraft {
                None => "All",
                Some(true) => "Has Kraft",
                Some(false) => "No Kraft",
            };
            egui::ComboBox::from_id_source("filter_kraft")
                .selected_text(kraft_text)
                .width(100.0)
                .show_ui(ui, |ui| {
                    for (value, text) in [(None, "All"), (Some(true), "Has Kraft"), (Some(false), "No Kraft")] {
                        if ui.selectable_value(&mut view.filters.has_kraft, value, text).clicked() {
                            event = Some(FilterBarEvent::ViewChanged);
                        }
                    }
                });

            ui.label("Barrier:");
            let barrier_text = view
                .filters
                .barrier_level
                .map(BarrierLevel::label)
                .unwrap_or("All");
            egui::ComboBox::from_id_source("filter_barrier")
                .selected_text(barrier_text)
                .width(80.0)
                .show_ui(ui, |ui| {
                    if ui.selectable_value(&mut view.filters.barrier_level, None, "All").clicked() {
                        event = Some(FilterBarEvent::ViewChanged);
                    }
                    for level in BarrierLevel::all() {
                        if ui
                            .selectable_value(&mut view.filters.barrier_level, Some(level), level.label())
                            .clicked()
                        {
                            event = Some(FilterBarEvent::ViewChanged);
                        }
                    }
                });

            ui.separator();

            let response = ui.add(
                egui::TextEdit::singleline(&mut view.search)
                    .hint_text("search...")
                    .desired_width(160.0),
            );
            if response.changed() {
                event = Some(FilterBarEvent::ViewChanged);
            }

            if view.filters.active_count() > 0 || !view.search.is_empty() {
                if ui.small_button("Clear all").clicked() {
                    view.filters.clear();
                    view.search.clear();
                    event = Some(FilterBarEvent::ViewChanged);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Showing {} of {} structures • sorted by {} ({})",
                        shown,
                        total,
                        view.sort_key.label(),
                        view.direction.label()
                    ))
                    .size(10.0)
                    .color(egui::Color32::GRAY),
                );
            });
        });

        ui.separator();

        event
    }
}
