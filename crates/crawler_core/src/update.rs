use crate::{
    build_job_spec, AppState, Catalog, Effect, Msg, Notice, PageRequest, StatusOutcome, ViewMode,
    STATUS_CHECK_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE,
};

/// Shown when the category taxonomy could not be fetched.
pub const CATALOG_FAILED_MESSAGE: &str =
    "Failed to load conference data. Please check server connection.";

/// Fresh state plus the startup effects.
pub fn init() -> (AppState, Vec<Effect>) {
    (AppState::new(), vec![Effect::LoadCatalog])
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CatalogLoaded(Ok(groups)) => {
            state.catalog = Catalog::from_groups(groups);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CatalogLoaded(Err(_)) => {
            // Manual venue entry stays usable without a taxonomy.
            state.catalog.mark_unavailable();
            state.set_notice(Notice::error(CATALOG_FAILED_MESSAGE));
            state.mark_dirty();
            Vec::new()
        }
        Msg::ReloadCatalogClicked => {
            state.clear_notice();
            state.mark_dirty();
            vec![Effect::LoadCatalog]
        }
        Msg::KeywordsChanged(text) => {
            if is_editable(&state) {
                state.keywords = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::YearStartChanged(text) => {
            if is_editable(&state) {
                state.year_start = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CategoriesSelected(names) => {
            if is_editable(&state) {
                state.selection.toggle_categories(&state.catalog, names);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ManualVenueConfirmed(raw) => {
            if is_editable(&state) && state.selection.add_manual(&raw) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::VenueRemoved(venue_id) => {
            if is_editable(&state) && state.selection.remove(&venue_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StartCrawlClicked => start_crawl(&mut state),
        Msg::SubmissionAccepted => {
            if state.job.accept() {
                state.mark_dirty();
                vec![Effect::StartPolling]
            } else {
                Vec::new()
            }
        }
        Msg::SubmissionFailed(_reason) => {
            if state.job.reject() {
                state.set_notice(Notice::error(SUBMIT_FAILED_MESSAGE));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StatusReceived(report) => match state.job.apply_status(&report) {
            Some(StatusOutcome::Completed { paper_count }) => {
                state.set_notice(Notice::success(format!(
                    "Successfully crawled {paper_count} papers."
                )));
                state.requested_view = ViewMode::Results;
                state.mark_dirty();
                let limit = state.pager.limit();
                let mut effects = vec![Effect::StopPolling];
                effects.extend(state.pager.fetch_page(0, limit).map(fetch_effect));
                effects
            }
            Some(StatusOutcome::Failed { message }) => {
                state.set_notice(Notice::error(format!("Crawling failed: {message}")));
                state.mark_dirty();
                vec![Effect::StopPolling]
            }
            Some(StatusOutcome::Pending) | None => Vec::new(),
        },
        Msg::StatusFailed(_reason) => {
            if state.job.poll_failed() {
                state.set_notice(Notice::error(STATUS_CHECK_FAILED_MESSAGE));
                state.mark_dirty();
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::PageRequested(page) => {
            let request = state.pager.go_to_page(page);
            request_page(&mut state, request)
        }
        Msg::PageSizeChanged(size) => {
            let request = state.pager.change_page_size(size);
            request_page(&mut state, request)
        }
        Msg::ResultsLoaded { request_id, page } => {
            if state.pager.apply_page(request_id, page) {
                state.requested_view = ViewMode::Results;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResultsFailed {
            request_id,
            message: _,
        } => {
            // Recoverable: the job lifecycle is untouched.
            if state.pager.apply_failure(request_id) {
                state.set_notice(Notice::error(crate::RESULTS_FAILED_MESSAGE));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ViewSelected(mode) => {
            if state.requested_view != mode {
                state.requested_view = mode;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DownloadClicked => {
            if state.download_available() {
                vec![Effect::DownloadCsv]
            } else {
                Vec::new()
            }
        }
        Msg::Shutdown => vec![Effect::StopPolling],
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_editable(state: &AppState) -> bool {
    !state.job.state().is_in_flight()
}

fn start_crawl(state: &mut AppState) -> Vec<Effect> {
    if state.job.state().is_in_flight() {
        return Vec::new();
    }
    state.clear_notice();
    state.mark_dirty();

    match build_job_spec(&state.keywords, state.selection.venue_ids(), &state.year_start) {
        Ok(spec) => {
            state.job.begin();
            vec![Effect::SubmitJob(spec)]
        }
        Err(err) => {
            state.set_notice(Notice::error(err.to_string()));
            Vec::new()
        }
    }
}

fn request_page(state: &mut AppState, request: Option<PageRequest>) -> Vec<Effect> {
    match request {
        Some(request) => {
            state.clear_notice();
            state.mark_dirty();
            vec![fetch_effect(request)]
        }
        None => Vec::new(),
    }
}

fn fetch_effect(request: PageRequest) -> Effect {
    Effect::FetchResults {
        request_id: request.request_id,
        offset: request.offset,
        limit: request.limit,
    }
}
