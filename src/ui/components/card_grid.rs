use eframe::egui;

use crate::catalog::Catalog;
use crate::ui::barrier_badge;

#[derive(Debug)]
pub enum CardGridEvent {
    StructureClicked(String),
}

/// Card presentation over the same view output the table shows.
pub struct CardGrid;

const CARD_WIDTH: f32 = 190.0;

impl CardGrid {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        catalog: &Catalog,
        rows: &[usize],
        current_page: usize,
        page_size: usize,
    ) -> Option<CardGridEvent> {
        let mut event = None;

        let total_rows = rows.len();
        let start_row = (current_page * page_size).min(total_rows);
        let end_row = (start_row + page_size).min(total_rows);
        let page_rows = &rows[start_row..end_row];

        let structures = catalog.structures();

        egui::ScrollArea::vertical()
            .id_source("card_grid")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for &structure_index in page_rows {
                        let structure = &structures[structure_index];

                        let response = egui::Frame::group(ui.style())
                            .rounding(6.0)
                            .inner_margin(egui::Margin::same(8.0))
                            .show(ui, |ui| {
                                ui.set_width(CARD_WIDTH);
                                ui.vertical(|ui| {
                                    ui.strong(&structure.short_name);

                                    ui.horizontal(|ui| {
                                        ui.label(
                                            egui::RichText::new(format!("OTR {}", structure.otr_display))
                                                .monospace()
                                                .size(10.0),
                                        );
                                        ui.label(
                                            egui::RichText::new(format!("WVTR {}", structure.wvtr_display))
                                                .monospace()
                                                .size(10.0),
                                        );
                                    });

                                    ui.horizontal(|ui| {
                                        barrier_badge(ui, structure.barrier_level);
                                        ui.label(
                                            egui::RichText::new(&structure.thickness)
                                                .size(10.0)
                                                .color(egui::Color32::from_rgb(150, 150, 150)),
                                        );
                                    });

                                    ui.label(
                                        egui::RichText::new(&structure.feature)
                                            .size(10.0)
                                            .color(egui::Color32::from_rgb(130, 130, 130)),
                                    );
                                });
                            })
                            .response;

                        let response = response.interact(egui::Sense::click());
                        if response.clicked() {
                            event = Some(CardGridEvent::StructureClicked(structure.id.clone()));
                        }
                        response.on_hover_text(&structure.name);
                    }
                });
            });

        event
    }
}
