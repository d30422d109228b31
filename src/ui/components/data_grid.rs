use eframe::egui;
use std::cell::Cell;

use crate::catalog::Catalog;
use crate::models::{SortDirection, SortKey, ViewState};
use crate::ui::barrier_badge;

#[derive(Debug)]
pub enum DataGridEvent {
    SortClicked(SortKey),
    StructureClicked(String),
}

/// Tabular presentation of the view output. Column headers are clickable and
/// carry the sort indicator; rows are indices into the catalog, already
/// filtered and ordered by the view model.
pub struct DataGrid {
    selected: Option<String>,
}

const SORTABLE_COLUMNS: [SortKey; 5] = [
    SortKey::Name,
    SortKey::Otr,
    SortKey::Wvtr,
    SortKey::BarrierLevel,
    SortKey::Thickness,
];

impl DataGrid {
    pub fn new() -> Self {
        Self { selected: None }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        catalog: &Catalog,
        rows: &[usize],
        view: &ViewState,
        current_page: usize,
        page_size: usize,
        show_category: bool,
    ) -> Option<DataGridEvent> {
        let sort_clicked = Cell::new(None);
        let structure_clicked = Cell::new(None);

        let total_rows = rows.len();
        let start_row = (current_page * page_size).min(total_rows);
        let end_row = (start_row + page_size).min(total_rows);
        let page_rows = &rows[start_row..end_row];

        let structures = catalog.structures();
        let data_columns = if show_category { 7 } else { 6 };

        let available_height = ui.available_height();
        egui::ScrollArea::both()
            .id_source("data_grid")
            .max_height(available_height)
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                use egui_extras::{Column, TableBuilder};

                let table = TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .vscroll(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(36.0).at_least(30.0).resizable(false))
                    .columns(Column::initial(130.0).at_least(70.0).resizable(true).clip(true), data_columns)
                    .min_scrolled_height(available_height);

                table
                    .header(22.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("#");
                        });

                        for key in SORTABLE_COLUMNS {
                            header.col(|ui| {
                                let sort_indicator = if view.sort_key == key {
                                    match view.direction {
                                        SortDirection::Ascending => " ▲",
                                        SortDirection::Descending => " ▼",
                                    }
                                } else {
                                    ""
                                };

                                let header_text = format!("{}{}", key.label(), sort_indicator);
                                if ui.button(egui::RichText::new(header_text).strong()).clicked() {
                                    sort_clicked.set(Some(key));
                                }
                            });
                        }

                        header.col(|ui| {
                            ui.strong("Features");
                        });

                        if show_category {
                            header.col(|ui| {
                                ui.strong("Category");
                            });
                        }
                    })
                    .body(|mut body| {
                        for (page_row_index, &structure_index) in page_rows.iter().enumerate() {
                            let structure = &structures[structure_index];
                            let is_selected = self.selected.as_deref() == Some(structure.id.as_str());

                            body.row(20.0, |mut row_ui| {
                                row_ui.col(|ui| {
                                    let line = start_row + page_row_index + 1;
                                    let response = ui.selectable_label(
                                        is_selected,
                                        egui::RichText::new(format!("{}", line))
                                            .color(egui::Color32::from_rgb(150, 150, 150)),
                                    );
                                    if response.clicked() {
                                        self.selected = if is_selected {
                                            None
                                        } else {
                                            Some(structure.id.clone())
                                        };
                                    }
                                });

                                row_ui.col(|ui| {
                                    let response = ui.link(&structure.short_name);
                                    if response.clicked() {
                                        structure_clicked.set(Some(structure_index));
                                    }
                                    response.context_menu(|ui| {
                                        if ui.button("Copy Link").clicked() {
                                            ui.output_mut(|o| o.copied_text = structure.url.clone());
                                            ui.close_menu();
                                        }
                                    });
                                });

                                row_ui.col(|ui| {
                                    Self::value_cell(ui, &structure.otr_display);
                                });
                                row_ui.col(|ui| {
                                    Self::value_cell(ui, &structure.wvtr_display);
                                });

                                row_ui.col(|ui| {
                                    barrier_badge(ui, structure.barrier_level);
                                });

                                row_ui.col(|ui| {
                                    Self::value_cell(ui, &structure.thickness);
                                });

                                row_ui.col(|ui| {
                                    let labels = structure.flag_labels();
                                    let text = if labels.is_empty() {
                                        "-".to_string()
                                    } else {
                                        labels.join(", ")
                                    };
                                    ui.label(egui::RichText::new(text).size(10.0));
                                });

                                if show_category {
                                    row_ui.col(|ui| {
                                        ui.label(
                                            egui::RichText::new(structure.category.label())
                                                .size(10.0)
                                                .color(egui::Color32::from_rgb(130, 130, 130)),
                                        );
                                    });
                                }
                            });
                        }
                    });
            });

        if let Some(key) = sort_clicked.get() {
            return Some(DataGridEvent::SortClicked(key));
        }
        if let Some(index) = structure_clicked.get() {
            return Some(DataGridEvent::StructureClicked(structures[index].id.clone()));
        }

        None
    }

    fn value_cell(ui: &mut egui::Ui, value: &str) {
        ui.style_mut().wrap = Some(false);
        let response = ui.add(
            egui::Label::new(egui::RichText::new(value).monospace())
                .truncate(true)
                .selectable(true),
        );
        response.context_menu(|ui| {
            if ui.button("Copy Cell Value").clicked() {
                ui.output_mut(|o| o.copied_text = value.to_string());
                ui.close_menu();
            }
        });
    }
}
