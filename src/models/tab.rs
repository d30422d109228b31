use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::models::{CachedView, ViewState};

/// The two presentation modes over the same filtered/sorted view output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Table,
    Cards,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Cards => "Cards",
        }
    }
}

/// What a tab shows: the whole catalog or one material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabSource {
    All,
    Category(Category),
}

impl TabSource {
    pub fn title(self) -> String {
        match self {
            TabSource::All => "All Structures".to_string(),
            TabSource::Category(category) => category.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: usize,
    pub source: TabSource,
    pub view: ViewState,
    pub view_mode: ViewMode,
    pub current_page: usize,
    pub page_size: usize,
    #[serde(skip)]
    pub cache: CachedView,
}

impl Tab {
    pub fn new(id: usize, source: TabSource, view_mode: ViewMode, page_size: usize) -> Self {
        let mut view = ViewState::default();
        if let TabSource::Category(category) = source {
            view.filters.category = Some(category);
        }
        Self {
            id,
            source,
            view,
            view_mode,
            current_page: 0,
            page_size,
            cache: CachedView::default(),
        }
    }

    pub fn title(&self) -> String {
        self.source.title()
    }

    /// Filter and search edits land the user on the first page of the new
    /// result set.
    pub fn reset_page(&mut self) {
        self.current_page = 0;
    }
}
