/// Shown when a results page could not be loaded.
pub const RESULTS_FAILED_MESSAGE: &str = "Failed to load results. Try downloading the CSV instead.";

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub records: Vec<ResultRecord>,
    pub total_count: u64,
    pub offset: usize,
    pub limit: usize,
}

/// A results fetch the shell should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub request_id: RequestId,
    pub offset: usize,
    pub limit: usize,
}

/// Paged view over the backend's results.
///
/// Every request gets a fresh id; only the response for the latest id is
/// applied, so a slow response for superseded parameters cannot overwrite a
/// newer page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPager {
    offset: usize,
    limit: usize,
    latest_request: RequestId,
    pending: bool,
    page: Option<ResultPage>,
}

impl Default for ResultsPager {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            latest_request: 0,
            pending: false,
            page: None,
        }
    }
}

impl ResultsPager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn page_index(&self) -> usize {
        self.offset / self.limit
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    pub fn page(&self) -> Option<&ResultPage> {
        self.page.as_ref()
    }

    pub fn total_count(&self) -> u64 {
        self.page.as_ref().map_or(0, |page| page.total_count)
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// Issues a fetch for `limit` records starting at `offset`.
    pub fn fetch_page(&mut self, offset: usize, limit: usize) -> Option<PageRequest> {
        if limit == 0 {
            return None;
        }
        self.offset = offset;
        self.limit = limit;
        self.latest_request += 1;
        self.pending = true;
        Some(PageRequest {
            request_id: self.latest_request,
            offset,
            limit,
        })
    }

    /// Fetches the zero-based page `page` at the current page size.
    pub fn go_to_page(&mut self, page: usize) -> Option<PageRequest> {
        let offset = page.checked_mul(self.limit)?;
        self.fetch_page(offset, self.limit)
    }

    /// Switches page size, resetting to the first page before refetching.
    /// Sizes outside [`PAGE_SIZE_OPTIONS`] are rejected.
    pub fn change_page_size(&mut self, new_limit: usize) -> Option<PageRequest> {
        if !PAGE_SIZE_OPTIONS.contains(&new_limit) {
            return None;
        }
        self.fetch_page(0, new_limit)
    }

    /// Applies a response. Returns `false` for superseded requests.
    pub fn apply_page(&mut self, request_id: RequestId, page: ResultPage) -> bool {
        if request_id != self.latest_request {
            return false;
        }
        self.pending = false;
        self.page = Some(page);
        true
    }

    /// Records a failed fetch. Returns `false` for superseded requests; the
    /// previously shown page is kept either way.
    pub fn apply_failure(&mut self, request_id: RequestId) -> bool {
        if request_id != self.latest_request {
            return false;
        }
        self.pending = false;
        true
    }
}
