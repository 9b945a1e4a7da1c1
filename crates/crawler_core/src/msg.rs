use crate::{CategoryGroup, RequestId, ResultPage, StatusReport, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Taxonomy fetch finished.
    CatalogLoaded(Result<Vec<CategoryGroup>, String>),
    /// User asked to retry the taxonomy fetch.
    ReloadCatalogClicked,
    /// User edited the keyword box.
    KeywordsChanged(String),
    /// User edited the start-year box.
    YearStartChanged(String),
    /// Full set of currently checked category names.
    CategoriesSelected(Vec<String>),
    /// User confirmed a typed venue id.
    ManualVenueConfirmed(String),
    /// User removed a venue chip.
    VenueRemoved(String),
    /// User clicked Start Crawling.
    StartCrawlClicked,
    /// Backend accepted the crawl job.
    SubmissionAccepted,
    /// Crawl submission failed; carries the transport reason for logging.
    SubmissionFailed(String),
    /// A status poll returned.
    StatusReceived(StatusReport),
    /// A status poll failed at the transport level.
    StatusFailed(String),
    /// User picked a zero-based results page.
    PageRequested(usize),
    /// User picked a page size.
    PageSizeChanged(usize),
    ResultsLoaded {
        request_id: RequestId,
        page: ResultPage,
    },
    ResultsFailed {
        request_id: RequestId,
        message: String,
    },
    /// User switched between the search and results views.
    ViewSelected(ViewMode),
    /// User asked for the CSV export.
    DownloadClicked,
    /// The shell is tearing down.
    Shutdown,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
