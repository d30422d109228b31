use eframe::egui;

use crate::catalog::MaterialStructure;
use crate::ui::barrier_badge;

#[derive(Debug)]
pub enum DetailDialogEvent {
    Close,
}

/// Data-sheet window for a single structure, the desktop counterpart of the
/// per-structure detail pages.
pub struct DetailDialog;

impl DetailDialog {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ctx: &egui::Context, structure: &MaterialStructure) -> Option<DetailDialogEvent> {
        let mut event = None;

        egui::Window::new(&structure.name)
            .id(egui::Id::new("structure_detail"))
            .default_width(380.0)
            .show(ctx, |ui| {
                egui::Grid::new("structure_detail_grid")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Short name:");
                        ui.label(&structure.short_name);
                        ui.end_row();

                        ui.label("Category:");
                        ui.label(structure.category.label());
                        ui.end_row();

                        ui.label("Barrier:");
                        barrier_badge(ui, structure.barrier_level);
                        ui.end_row();

                        ui.label("OTR:");
                        ui.label(egui::RichText::new(&structure.otr_display).monospace());
                        ui.end_row();

                        ui.label("WVTR:");
                        ui.label(egui::RichText::new(&structure.wvtr_display).monospace());
                        ui.end_row();

                        ui.label("Thickness:");
                        ui.label(egui::RichText::new(&structure.thickness).monospace());
                        ui.end_row();

                        ui.label("Features:");
                        let labels = structure.flag_labels();
                        if labels.is_empty() {
                            ui.label("-");
                        } else {
                            ui.label(labels.join(", "));
                        }
                        ui.end_row();

                        ui.label("Best for:");
                        ui.label(structure.best_for.join(", "));
                        ui.end_row();

                        ui.label("Highlight:");
                        ui.label(&structure.feature);
                        ui.end_row();

                        ui.label("Image:");
                        ui.label(egui::RichText::new(&structure.img).monospace().size(10.0));
                        ui.end_row();

                        ui.label("Link:");
                        ui.label(egui::RichText::new(&structure.url).monospace().size(10.0));
                        ui.end_row();
                    });

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Copy Link").clicked() {
                        ui.output_mut(|o| o.copied_text = structure.url.clone());
                    }
                    if ui.button("Close").clicked() {
                        event = Some(DetailDialogEvent::Close);
                    }
                });
            });

        event
    }
}
