mod state;
mod tab;
mod view;

pub use state::AppState;
pub use tab::{Tab, TabSource, ViewMode};
pub use view::{apply, apply_indices, CachedView, FilterSelection, SortDirection, SortKey, ViewState};
