//! Crawler engine: backend contract client, status poller and effect execution.
mod client;
mod engine;
mod export;
mod poller;
mod types;

pub use client::{ApiSettings, Backend, ReqwestBackend};
pub use engine::EngineHandle;
pub use export::{CsvExport, ExportError};
pub use poller::{run_status_poll, ChannelEventSink, EventSink, PollHandle};
pub use types::{
    ApiError, CrawlRequest, EngineEvent, FailureKind, PaperRecord, ResultsResponse,
    StatusResponse, WireCategory, WireVenue,
};
