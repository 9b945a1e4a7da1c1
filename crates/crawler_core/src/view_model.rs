use crate::{CatalogStatus, JobLifecycleState, Notice, ResultRecord, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRowView {
    pub name: String,
    pub checked: bool,
    pub venue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueChipView {
    pub venue_id: String,
    pub label: String,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub rows: Vec<ResultRecord>,
    pub total: u64,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub lifecycle: JobLifecycleState,
    pub keywords: String,
    pub year_start: String,
    pub inputs_enabled: bool,
    pub start_enabled: bool,
    pub catalog_status: CatalogStatus,
    pub categories: Vec<CategoryRowView>,
    pub venues: Vec<VenueChipView>,
    pub notice: Option<Notice>,
    pub view_mode: ViewMode,
    pub results_tab_enabled: bool,
    pub download_available: bool,
    pub results: ResultsView,
    pub dirty: bool,
}
