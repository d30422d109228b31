use eframe::egui;

#[derive(Debug)]
pub enum MenuBarEvent {
    ShowSettings,
    Quit,
    ReloadCatalog,
    UseBuiltinCatalog,
}

pub struct MenuBar;

impl MenuBar {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, catalog_status: &str) -> Option<MenuBarEvent> {
        let mut event = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Reload Catalog").clicked() {
                    event = Some(MenuBarEvent::ReloadCatalog);
                    ui.close_menu();
                }
                if ui.button("Use Built-in Catalog").clicked() {
                    event = Some(MenuBarEvent::UseBuiltinCatalog);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Settings...").clicked() {
                    event = Some(MenuBarEvent::ShowSettings);
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    event = Some(MenuBarEvent::Quit);
                }
            });

            ui.separator();

            if ui.button("🔄 Reload").clicked() {
                event = Some(MenuBarEvent::ReloadCatalog);
            }

            ui.separator();
            ui.label(catalog_status);
        });

        event
    }
}
