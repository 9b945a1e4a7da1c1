use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crawler_logging::{crawler_error, crawler_info, crawler_warn};

use crate::poller::{ChannelEventSink, EventSink, PollHandle};
use crate::{ApiError, ApiSettings, Backend, CrawlRequest, CsvExport, EngineEvent, ReqwestBackend};

enum EngineCommand {
    LoadCatalog,
    Submit(CrawlRequest),
    StartPolling,
    StopPolling,
    FetchResults {
        request_id: u64,
        offset: usize,
        limit: usize,
    },
    Download {
        filename: String,
    },
    Shutdown,
}

/// Runs backend calls on a dedicated tokio runtime thread and reports their
/// outcome as [`EngineEvent`]s.
///
/// At most one status-poll schedule exists at a time. Dropping the handle
/// cancels it and stops the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings, output_dir: PathBuf) -> Result<Self, ApiError> {
        let poll_interval = settings.poll_interval;
        let export = CsvExport::new(output_dir, settings.max_download_bytes);
        let backend = Arc::new(ReqwestBackend::new(settings)?);
        Ok(Self::with_backend(backend, poll_interval, export))
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        poll_interval: Duration,
        export: CsvExport,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    crawler_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut poll: Option<PollHandle> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartPolling => {
                        // Replacing the handle cancels any previous schedule.
                        poll = Some(PollHandle::spawn(
                            runtime.handle(),
                            backend.clone(),
                            poll_interval,
                            sink.clone(),
                        ));
                    }
                    EngineCommand::StopPolling => {
                        if let Some(handle) = poll.take() {
                            handle.cancel();
                        }
                    }
                    EngineCommand::Shutdown => break,
                    command => {
                        let backend = backend.clone();
                        let sink = sink.clone();
                        let export = export.clone();
                        runtime.spawn(async move {
                            handle_command(backend.as_ref(), &export, command, sink.as_ref()).await;
                        });
                    }
                }
            }

            drop(poll);
            runtime.shutdown_timeout(Duration::from_millis(500));
            crawler_info!("Engine stopped");
        });

        Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    pub fn load_catalog(&self) {
        self.send(EngineCommand::LoadCatalog);
    }

    pub fn submit(&self, request: CrawlRequest) {
        self.send(EngineCommand::Submit(request));
    }

    pub fn start_polling(&self) {
        self.send(EngineCommand::StartPolling);
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    pub fn fetch_results(&self, request_id: u64, offset: usize, limit: usize) {
        self.send(EngineCommand::FetchResults {
            request_id,
            offset,
            limit,
        });
    }

    pub fn download_csv(&self, filename: impl Into<String>) {
        self.send(EngineCommand::Download {
            filename: filename.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            crawler_warn!("Engine is not running; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    export: &CsvExport,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::LoadCatalog => {
            sink.emit(EngineEvent::CatalogLoaded(backend.conferences().await));
        }
        EngineCommand::Submit(request) => {
            let result = backend.submit_crawl(&request).await;
            if let Err(err) = &result {
                crawler_warn!("Crawl submission failed: {}", err);
            }
            sink.emit(EngineEvent::SubmissionCompleted(result));
        }
        EngineCommand::FetchResults {
            request_id,
            offset,
            limit,
        } => {
            let result = backend.results(offset, limit).await;
            if let Err(err) = &result {
                crawler_warn!("Results request {} failed: {}", request_id, err);
            }
            sink.emit(EngineEvent::ResultsLoaded { request_id, result });
        }
        EngineCommand::Download { filename } => {
            let result = backend.download_csv(export, &filename).await;
            match &result {
                Ok(path) => crawler_info!("Saved CSV export to {:?}", path),
                Err(err) => crawler_warn!("CSV download failed: {}", err),
            }
            sink.emit(EngineEvent::DownloadCompleted(result));
        }
        EngineCommand::StartPolling | EngineCommand::StopPolling | EngineCommand::Shutdown => {}
    }
}
