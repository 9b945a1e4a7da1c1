use crawler_core::{
    update, AppState, Effect, Msg, Notice, ResultPage, ResultRecord, StatusReport, ViewMode,
    RESULTS_FAILED_MESSAGE,
};
use pretty_assertions::assert_eq;

fn record(title: &str) -> ResultRecord {
    ResultRecord {
        title: title.to_string(),
        authors: "A. Author".to_string(),
        venue: "AAAI".to_string(),
        year: 2021,
    }
}

fn page(offset: usize, limit: usize, total: u64, titles: &[&str]) -> ResultPage {
    ResultPage {
        records: titles.iter().map(|title| record(title)).collect(),
        total_count: total,
        offset,
        limit,
    }
}

fn fetch_of(effects: &[Effect]) -> (u64, usize, usize) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchResults {
                request_id,
                offset,
                limit,
            } => Some((*request_id, *offset, *limit)),
            _ => None,
        })
        .expect("fetch effect")
}

fn completed_state() -> (AppState, u64) {
    let msgs = vec![
        Msg::KeywordsChanged("ml".to_string()),
        Msg::ManualVenueConfirmed("aaai".to_string()),
        Msg::StartCrawlClicked,
        Msg::SubmissionAccepted,
    ];
    let state = msgs
        .into_iter()
        .fold(AppState::new(), |state, msg| update(state, msg).0);
    let (state, effects) = update(
        state,
        Msg::StatusReceived(StatusReport {
            completed: true,
            paper_count: Some(45),
            error: None,
        }),
    );
    (state, fetch_of(&effects).0)
}

#[test]
fn page_size_change_resets_offset_before_fetching() {
    let (state, effects) = update(AppState::new(), Msg::PageSizeChanged(10));
    let (_, offset, limit) = fetch_of(&effects);
    assert_eq!((offset, limit), (0, 10));

    let (state, effects) = update(state, Msg::PageRequested(2));
    let (_, offset, limit) = fetch_of(&effects);
    assert_eq!((offset, limit), (20, 10));
    assert_eq!(state.pager().offset(), 20);

    let (state, effects) = update(state, Msg::PageSizeChanged(25));
    let (_, offset, limit) = fetch_of(&effects);
    assert_eq!((offset, limit), (0, 25));
    assert_eq!(state.pager().offset(), 0);
}

#[test]
fn loaded_page_populates_results_view() {
    let (state, request_id) = completed_state();
    let (state, effects) = update(
        state,
        Msg::ResultsLoaded {
            request_id,
            page: page(0, 10, 45, &["First", "Second"]),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.view_mode, ViewMode::Results);
    assert!(view.results_tab_enabled);
    assert!(view.download_available);
    assert_eq!(view.results.total, 45);
    assert_eq!(view.results.page_count, 5);
    assert_eq!(view.results.rows.len(), 2);
    assert!(!view.results.loading);
}

#[test]
fn stale_response_does_not_overwrite_newer_page() {
    let (state, first_id) = completed_state();
    let (state, effects) = update(state, Msg::PageRequested(1));
    let (second_id, _, _) = fetch_of(&effects);
    assert!(second_id > first_id);

    let (state, _) = update(
        state,
        Msg::ResultsLoaded {
            request_id: second_id,
            page: page(10, 10, 45, &["Page two"]),
        },
    );
    let (state, _) = update(
        state,
        Msg::ResultsLoaded {
            request_id: first_id,
            page: page(0, 10, 45, &["Page one"]),
        },
    );

    let view = state.view();
    assert_eq!(view.results.rows[0].title, "Page two");
    assert_eq!(view.results.page_index, 1);
}

#[test]
fn results_failure_is_recoverable() {
    let (state, request_id) = completed_state();
    let lifecycle = state.lifecycle().clone();

    let (state, effects) = update(
        state,
        Msg::ResultsFailed {
            request_id,
            message: "500".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.lifecycle(), &lifecycle);
    assert_eq!(state.notice(), Some(&Notice::error(RESULTS_FAILED_MESSAGE)));

    let (_, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(effects, vec![Effect::DownloadCsv]);
}

#[test]
fn stale_failure_is_ignored() {
    let (state, first_id) = completed_state();
    let (state, _) = update(state, Msg::PageRequested(1));
    let (state, _) = update(
        state,
        Msg::ResultsFailed {
            request_id: first_id,
            message: "late".to_string(),
        },
    );
    assert_eq!(state.notice(), None);
    assert!(state.pager().is_loading());
}

#[test]
fn next_page_clears_earlier_results_failure() {
    let (state, first_id) = completed_state();
    let (state, _) = update(
        state,
        Msg::ResultsFailed {
            request_id: first_id,
            message: "500".to_string(),
        },
    );
    assert!(state.notice().is_some_and(Notice::is_error));

    let (state, effects) = update(state, Msg::PageRequested(1));
    let (second_id, offset, _) = fetch_of(&effects);
    assert_eq!(offset, 10);
    assert_eq!(state.notice(), None);

    let (state, _) = update(
        state,
        Msg::ResultsLoaded {
            request_id: second_id,
            page: page(10, 10, 45, &["Page two"]),
        },
    );
    assert_eq!(state.notice(), None);
    assert_eq!(state.view().results.rows[0].title, "Page two");
}

#[test]
fn page_size_change_clears_notice() {
    let (state, _) = completed_state();
    assert!(state.notice().is_some());

    let (state, effects) = update(state, Msg::PageSizeChanged(25));
    assert_eq!(fetch_of(&effects).2, 25);
    assert_eq!(state.notice(), None);
}

#[test]
fn results_view_is_locked_until_completion() {
    let (state, _) = update(AppState::new(), Msg::ViewSelected(ViewMode::Results));
    assert_eq!(state.view_mode(), ViewMode::Search);
    assert!(!state.view().results_tab_enabled);

    let (_, effects) = update(state, Msg::DownloadClicked);
    assert!(effects.is_empty());
}

#[test]
fn results_view_stays_selectable_after_revisiting_search() {
    let (state, _) = completed_state();
    let (state, _) = update(state, Msg::ViewSelected(ViewMode::Search));
    assert_eq!(state.view_mode(), ViewMode::Search);

    // A new crawl starts; the earlier completion still unlocks results.
    let (state, _) = update(state, Msg::StartCrawlClicked);
    assert!(state.view().results_tab_enabled);
    let (state, _) = update(state, Msg::ViewSelected(ViewMode::Results));
    assert_eq!(state.view_mode(), ViewMode::Results);
}
