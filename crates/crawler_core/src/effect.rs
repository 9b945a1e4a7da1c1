use crate::{JobSpec, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the category taxonomy.
    LoadCatalog,
    /// Submit a crawl job.
    SubmitJob(JobSpec),
    /// Start the recurring status poll. Replaces any running schedule.
    StartPolling,
    /// Cancel the status poll schedule.
    StopPolling,
    FetchResults {
        request_id: RequestId,
        offset: usize,
        limit: usize,
    },
    /// Save the full CSV export.
    DownloadCsv,
}
