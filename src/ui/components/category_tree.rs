use eframe::egui;
use std::collections::HashSet;

use crate::catalog::{Catalog, Category};
use crate::models::TabSource;

#[derive(Debug)]
pub enum CategoryTreeEvent {
    SourceClicked(TabSource),
    StructureClicked(String),
    CategoryToggled(String),
}

pub struct CategoryTree;

impl CategoryTree {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        catalog: &Catalog,
        expanded: &HashSet<String>,
        selected_structure: &Option<String>,
    ) -> Option<CategoryTreeEvent> {
        let mut event = None;

        egui::ScrollArea::vertical()
            .id_source("catalog_sidebar")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if ui
                    .selectable_label(false, format!("📦 All Structures ({})", catalog.len()))
                    .clicked()
                {
                    event = Some(CategoryTreeEvent::SourceClicked(TabSource::All));
                }

                ui.separator();

                for category in Category::all() {
                    let is_expanded = expanded.contains(category.key());

                    ui.horizontal(|ui| {
                        let arrow = if is_expanded { "▼" } else { "▶" };
                        if ui.button(arrow).clicked() {
                            event = Some(CategoryTreeEvent::CategoryToggled(category.key().to_string()));
                        }
                        let label = egui::RichText::new(category.label()).strong();
                        if ui.selectable_label(false, label).clicked() {
                            event = Some(CategoryTreeEvent::SourceClicked(TabSource::Category(category)));
                        }
                        ui.label(format!("({})", catalog.count_in(category)));
                    });

                    if is_expanded {
                        ui.indent(category.key(), |ui| {
                            for structure in catalog.in_category(category) {
                                let is_selected =
                                    selected_structure.as_deref() == Some(structure.id.as_str());
                                let response =
                                    ui.selectable_label(is_selected, &structure.short_name);

                                if response.clicked() {
                                    event = Some(CategoryTreeEvent::StructureClicked(
                                        structure.id.clone(),
                                    ));
                                }

                                response.context_menu(|ui| {
                                    if ui.button("View Details").clicked() {
                                        event = Some(CategoryTreeEvent::StructureClicked(
                                            structure.id.clone(),
                                        ));
                                        ui.close_menu();
                                    }
                                });
                            }
                        });
                    }
                }
            });

        event
    }
}
