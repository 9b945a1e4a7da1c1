use crate::view_mode::{results_selectable, select_view};
use crate::view_model::{AppViewModel, CategoryRowView, ResultsView, VenueChipView};
use crate::{
    Catalog, JobController, JobLifecycleState, Notice, ResultsPager, SelectionState, ViewMode,
    DEFAULT_YEAR_START,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) catalog: Catalog,
    pub(crate) selection: SelectionState,
    pub(crate) keywords: String,
    pub(crate) year_start: String,
    pub(crate) job: JobController,
    pub(crate) pager: ResultsPager,
    pub(crate) requested_view: ViewMode,
    pub(crate) notice: Option<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: Catalog::new(),
            selection: SelectionState::new(),
            keywords: String::new(),
            year_start: DEFAULT_YEAR_START.to_string(),
            job: JobController::new(),
            pager: ResultsPager::new(),
            requested_view: ViewMode::Search,
            notice: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn job(&self) -> &JobController {
        &self.job
    }

    pub fn lifecycle(&self) -> &JobLifecycleState {
        self.job.state()
    }

    pub fn pager(&self) -> &ResultsPager {
        &self.pager
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        select_view(
            self.requested_view,
            self.job.state(),
            self.job.completed_once(),
            self.pager.total_count(),
        )
    }

    pub fn download_available(&self) -> bool {
        self.pager.total_count() > 0 || self.job.completed_once()
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub(crate) fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn view(&self) -> AppViewModel {
        let lifecycle = self.job.state().clone();
        let editable = !lifecycle.is_in_flight();

        let categories = self
            .catalog
            .groups()
            .iter()
            .map(|group| CategoryRowView {
                name: group.name.clone(),
                checked: self.selection.is_category_selected(&group.name),
                venue_count: group.conferences.len(),
            })
            .collect();

        let venues = self
            .selection
            .venue_ids()
            .iter()
            .map(|id| VenueChipView {
                venue_id: id.clone(),
                label: self.catalog.display_name(id),
                removable: editable,
            })
            .collect();

        let total = self.pager.total_count();
        let page_size = self.pager.limit();
        let results = ResultsView {
            rows: self
                .pager
                .page()
                .map(|page| page.records.clone())
                .unwrap_or_default(),
            total,
            page_index: self.pager.page_index(),
            page_size,
            page_count: usize::try_from(total)
                .map_or(usize::MAX, |total| total.div_ceil(page_size)),
            loading: self.pager.is_loading(),
        };

        AppViewModel {
            results_tab_enabled: results_selectable(
                &lifecycle,
                self.job.completed_once(),
                total,
            ),
            view_mode: self.view_mode(),
            start_enabled: editable,
            inputs_enabled: editable,
            lifecycle,
            keywords: self.keywords.clone(),
            year_start: self.year_start.clone(),
            catalog_status: self.catalog.status(),
            categories,
            venues,
            notice: self.notice.clone(),
            download_available: self.download_available(),
            results,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
