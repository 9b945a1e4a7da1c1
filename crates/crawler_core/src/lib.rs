//! Crawler core: pure job lifecycle state machine and view-model helpers.
mod catalog;
mod effect;
mod lifecycle;
mod msg;
mod notice;
mod pager;
mod request;
mod selection;
mod state;
mod update;
mod view_mode;
mod view_model;

pub use catalog::{Catalog, CatalogStatus, CategoryGroup, VenueRef};
pub use effect::Effect;
pub use lifecycle::{
    JobController, JobLifecycleState, StatusOutcome, StatusReport, STATUS_CHECK_FAILED_MESSAGE,
    SUBMIT_FAILED_MESSAGE,
};
pub use msg::Msg;
pub use notice::Notice;
pub use pager::{
    PageRequest, RequestId, ResultPage, ResultRecord, ResultsPager, DEFAULT_PAGE_SIZE,
    PAGE_SIZE_OPTIONS, RESULTS_FAILED_MESSAGE,
};
pub use request::{build_job_spec, JobSpec, ValidationError, DEFAULT_YEAR_START};
pub use selection::SelectionState;
pub use state::AppState;
pub use update::{init, update, CATALOG_FAILED_MESSAGE};
pub use view_mode::{results_selectable, select_view, ViewMode};
pub use view_model::{AppViewModel, CategoryRowView, ResultsView, VenueChipView};
