use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::models::{AppState, Tab, TabSource, ViewMode};
use crate::ui::components::*;
use crate::ui::setup_styles;
use eframe::egui;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct CatalogApp {
    // Catalog state
    pub config: Config,
    pub catalog: Catalog,
    pub catalog_status: String,

    // Tabs
    pub tabs: Vec<Tab>,
    pub active_tab: usize,
    pub next_tab_id: usize,

    // Sidebar and detail selection
    pub expanded_categories: HashSet<String>,
    pub selected_structure: Option<String>,
    pub detail_structure: Option<String>,

    // Settings dialog
    pub show_settings: bool,
    pub catalog_path_input: String,

    // Status
    pub status_message: String,

    // UI Components
    menu_bar: MenuBar,
    status_bar: StatusBar,
    category_tree: CategoryTree,
    tab_bar: TabBar,
    filter_bar: FilterBar,
    pagination: PaginationControls,
    data_grid: DataGrid,
    card_grid: CardGrid,
    settings_dialog: SettingsDialog,
    detail_dialog: DetailDialog,
}

impl CatalogApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        setup_styles(&cc.egui_ctx);

        let config = Config::load().unwrap_or_else(|err| {
            warn!("could not load config: {err:#}");
            Config::new()
        });

        let (catalog, catalog_status) = match &config.catalog_path {
            Some(path) => match Catalog::load(path) {
                Ok(loaded) => {
                    let status = format!("Catalog: {} ({} structures)", path.display(), loaded.len());
                    (loaded, status)
                }
                Err(err) => {
                    warn!("could not load catalog {}: {err:#}", path.display());
                    let builtin = catalog::builtin().clone();
                    let status = format!("Catalog: built-in ({} structures)", builtin.len());
                    (builtin, status)
                }
            },
            None => {
                let builtin = catalog::builtin().clone();
                let status = format!("Catalog: built-in ({} structures)", builtin.len());
                (builtin, status)
            }
        };

        // Restore the previous session's tabs and sidebar layout
        let (tabs, active_tab, next_tab_id, expanded_categories) = if let Ok(state) = AppState::load() {
            (state.tabs, state.active_tab, state.next_tab_id, state.expanded_categories)
        } else {
            (Vec::new(), 0, 0, HashSet::new())
        };

        let catalog_path_input = config
            .catalog_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let mut app = Self {
            config,
            catalog,
            catalog_status,
            tabs,
            active_tab,
            next_tab_id,
            expanded_categories,
            selected_structure: None,
            detail_structure: None,
            show_settings: false,
            catalog_path_input,
            status_message: "Ready".to_string(),
            menu_bar: MenuBar::new(),
            status_bar: StatusBar::new(),
            category_tree: CategoryTree::new(),
            tab_bar: TabBar::new(),
            filter_bar: FilterBar::new(),
            pagination: PaginationControls::new(),
            data_grid: DataGrid::new(),
            card_grid: CardGrid::new(),
            settings_dialog: SettingsDialog::new(),
            detail_dialog: DetailDialog::new(),
        };

        if app.tabs.is_empty() {
            app.open_source(TabSource::All);
        }

        app
    }

    pub fn save_state(&self) {
        let state = AppState {
            tabs: self.tabs.clone(),
            active_tab: self.active_tab,
            next_tab_id: self.next_tab_id,
            expanded_categories: self.expanded_categories.clone(),
        };
        if let Err(err) = state.save() {
            warn!("could not save UI state: {err:#}");
        }
    }

    /// Focuses the tab showing `source`, opening one if none is.
    pub fn open_source(&mut self, source: TabSource) {
        if let Some(index) = self.tabs.iter().position(|tab| tab.source == source) {
            self.active_tab = index;
        } else {
            let tab = Tab::new(
                self.next_tab_id,
                source,
                self.config.default_view_mode,
                self.config.default_page_size,
            );
            self.next_tab_id += 1;
            self.tabs.push(tab);
            self.active_tab = self.tabs.len() - 1;
        }
        self.save_state();
    }

    pub fn close_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.tabs.remove(index);
            if self.active_tab >= self.tabs.len() && self.active_tab > 0 {
                self.active_tab = self.tabs.len() - 1;
            }
            self.save_state();
        }
    }

    pub fn load_catalog(&mut self, path: PathBuf) {
        match Catalog::load(&path) {
            Ok(loaded) => {
                info!("loaded {} structures from {}", loaded.len(), path.display());
                self.status_message =
                    format!("Loaded {} structures from {}", loaded.len(), path.display());
                self.catalog_status =
                    format!("Catalog: {} ({} structures)", path.display(), loaded.len());
                self.catalog = loaded;
                self.config.catalog_path = Some(path);
                if let Err(err) = self.config.save() {
                    warn!("could not save config: {err:#}");
                }
                self.reset_tab_pages();
            }
            Err(err) => {
                warn!("catalog load failed: {err:#}");
                self.status_message = format!("Catalog load failed: {err:#}");
            }
        }
    }

    pub fn use_builtin_catalog(&mut self) {
        self.catalog = catalog::builtin().clone();
        self.config.catalog_path = None;
        if let Err(err) = self.config.save() {
            warn!("could not save config: {err:#}");
        }
        self.catalog_status = format!("Catalog: built-in ({} structures)", self.catalog.len());
        self.status_message = format!("Using built-in catalog ({} structures)", self.catalog.len());
        self.reset_tab_pages();
    }

    pub fn reload_catalog(&mut self) {
        match self.config.catalog_path.clone() {
            Some(path) => self.load_catalog(path),
            None => self.use_builtin_catalog(),
        }
    }

    // A swapped catalog can shrink any tab's result set
    fn reset_tab_pages(&mut self) {
        for tab in &mut self.tabs {
            tab.reset_page();
        }
    }

    fn open_detail(&mut self, id: String) {
        self.selected_structure = Some(id.clone());
        self.detail_structure = Some(id);
    }
}

impl eframe::App for CatalogApp {
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.save_state();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            if let Some(event) = self.menu_bar.show(ui, &self.catalog_status) {
                match event {
                    MenuBarEvent::ShowSettings => self.show_settings = true,
                    MenuBarEvent::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                    MenuBarEvent::ReloadCatalog => self.reload_catalog(),
                    MenuBarEvent::UseBuiltinCatalog => self.use_builtin_catalog(),
                }
            }
        });

        // Status bar counts come from the memoized view, so asking here and
        // again in the central panel costs one computation, not two.
        let counts = match self.tabs.get_mut(self.active_tab) {
            Some(tab) => match tab.cache.rows(self.catalog.structures(), &tab.view) {
                Ok(rows) => Some((rows.len(), self.catalog.len())),
                Err(_) => None,
            },
            None => None,
        };

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar.show(ui, &self.status_message, counts);
        });

        // Settings dialog
        if self.show_settings {
            if let Some(event) =
                self.settings_dialog
                    .show(ctx, &mut self.config, &mut self.catalog_path_input)
            {
                match event {
                    SettingsDialogEvent::DefaultsChanged => {
                        if let Err(err) = self.config.save() {
                            warn!("could not save config: {err:#}");
                        }
                    }
                    SettingsDialogEvent::LoadCatalog(path) => self.load_catalog(path),
                    SettingsDialogEvent::UseBuiltinCatalog => self.use_builtin_catalog(),
                    SettingsDialogEvent::Close => self.show_settings = false,
                }
            }
        }

        // Detail window for the selected structure
        if let Some(id) = self.detail_structure.clone() {
            match self.catalog.by_id(&id) {
                Some(structure) => {
                    if let Some(DetailDialogEvent::Close) = self.detail_dialog.show(ctx, structure) {
                        self.detail_structure = None;
                    }
                }
                None => {
                    // The structure disappeared with a catalog swap
                    self.detail_structure = None;
                }
            }
        }

        // Left sidebar: catalog categories
        egui::SidePanel::left("catalog_panel")
            .resizable(true)
            .default_width(260.0)
            .min_width(200.0)
            .max_width(480.0)
            .show(ctx, |ui| {
                ui.heading("Catalog");
                ui.separator();

                if let Some(event) = self.category_tree.show(
                    ui,
                    &self.catalog,
                    &self.expanded_categories,
                    &self.selected_structure,
                ) {
                    match event {
                        CategoryTreeEvent::SourceClicked(source) => self.open_source(source),
                        CategoryTreeEvent::StructureClicked(id) => self.open_detail(id),
                        CategoryTreeEvent::CategoryToggled(key) => {
                            if self.expanded_categories.contains(&key) {
                                self.expanded_categories.remove(&key);
                            } else {
                                self.expanded_categories.insert(key);
                            }
                            self.save_state();
                        }
                    }
                }
            });

        // Main content area: tabs, toolbar, view output
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(event) = self.tab_bar.show(ui, &self.tabs, self.active_tab) {
                match event {
                    TabBarEvent::TabActivated(i) => {
                        self.active_tab = i;
                        self.save_state();
                    }
                    TabBarEvent::TabClosed(i) => {
                        self.close_tab(i);
                    }
                }
            }

            if self.tabs.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Select a category from the sidebar");
                });
                return;
            }

            let active = self.active_tab;
            let (rows, view_error) = match self.tabs.get_mut(active) {
                Some(tab) => match tab.cache.rows(self.catalog.structures(), &tab.view) {
                    Ok(rows) => (rows.to_vec(), None),
                    Err(err) => (Vec::new(), Some(format!("{err:#}"))),
                },
                None => (Vec::new(), None),
            };

            if let Some(err) = view_error {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(egui::Color32::RED, format!("View error: {err}"));
                });
                return;
            }

            let Some(tab) = self.tabs.get_mut(active) else {
                return;
            };

            let total = match tab.source {
                TabSource::All => self.catalog.len(),
                TabSource::Category(category) => self.catalog.count_in(category),
            };
            let show_category = matches!(tab.source, TabSource::All);

            let mut state_dirty = false;

            if let Some(event) =
                self.filter_bar
                    .show(ui, &mut tab.view, &mut tab.view_mode, rows.len(), total)
            {
                match event {
                    FilterBarEvent::ViewChanged => {
                        tab.reset_page();
                        state_dirty = true;
                    }
                    FilterBarEvent::ModeChanged => {
                        state_dirty = true;
                    }
                }
            }

            if let Some(event) = self
                .pagination
                .show(ui, tab.current_page, tab.page_size, rows.len())
            {
                match event {
                    PaginationEvent::PageSizeChanged(size) => {
                        tab.page_size = size;
                        tab.reset_page();
                        state_dirty = true;
                    }
                    PaginationEvent::PageChanged(page) => {
                        tab.current_page = page;
                        state_dirty = true;
                    }
                }
            }

            match tab.view_mode {
                ViewMode::Table => {
                    if let Some(event) = self.data_grid.show(
                        ui,
                        &self.catalog,
                        &rows,
                        &tab.view,
                        tab.current_page,
                        tab.page_size,
                        show_category,
                    ) {
                        match event {
                            DataGridEvent::SortClicked(key) => {
                                tab.view.sort_by(key);
                                state_dirty = true;
                            }
                            DataGridEvent::StructureClicked(id) => {
                                self.selected_structure = Some(id.clone());
                                self.detail_structure = Some(id);
                            }
                        }
                    }
                }
                ViewMode::Cards => {
                    if let Some(CardGridEvent::StructureClicked(id)) = self.card_grid.show(
                        ui,
                        &self.catalog,
                        &rows,
                        tab.current_page,
                        tab.page_size,
                    ) {
                        self.selected_structure = Some(id.clone());
                        self.detail_structure = Some(id);
                    }
                }
            }

            if state_dirty {
                self.save_state();
            }
        });
    }
}
