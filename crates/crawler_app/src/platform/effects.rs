use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Local;
use crawler_core::{
    CategoryGroup, Effect, JobSpec, Msg, RequestId, ResultPage, ResultRecord, StatusReport,
    VenueRef,
};
use crawler_engine::{
    ApiError, CrawlRequest, EngineEvent, EngineHandle, PaperRecord, ResultsResponse,
    StatusResponse, WireCategory,
};
use crawler_logging::{crawler_info, crawler_warn};

/// Messages for the core plus shell-only notes produced by drained engine
/// events.
#[derive(Debug, Default)]
pub(crate) struct Drained {
    pub msgs: Vec<Msg>,
    pub notes: Vec<String>,
}

/// Executes core effects on the engine and maps engine events back to
/// messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    pending_pages: HashMap<RequestId, (usize, usize)>,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            pending_pages: HashMap::new(),
        }
    }

    pub(crate) fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadCatalog => self.engine.load_catalog(),
                Effect::SubmitJob(spec) => {
                    crawler_info!(
                        "SubmitJob keywords={:?} venues={} year_start={}",
                        spec.keywords,
                        spec.venue_ids.len(),
                        spec.year_start
                    );
                    self.engine.submit(to_crawl_request(spec));
                }
                Effect::StartPolling => self.engine.start_polling(),
                Effect::StopPolling => self.engine.stop_polling(),
                Effect::FetchResults {
                    request_id,
                    offset,
                    limit,
                } => {
                    self.pending_pages.insert(request_id, (offset, limit));
                    self.engine.fetch_results(request_id, offset, limit);
                }
                Effect::DownloadCsv => {
                    let filename = format!("papers-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
                    self.engine.download_csv(filename);
                }
            }
        }
    }

    /// Collects every engine event that is ready without blocking.
    pub(crate) fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::CatalogLoaded(result) => {
                    drained.msgs.push(Msg::CatalogLoaded(
                        result.map(map_categories).map_err(|err| err.to_string()),
                    ));
                }
                EngineEvent::SubmissionCompleted(Ok(())) => {
                    drained.msgs.push(Msg::SubmissionAccepted);
                }
                EngineEvent::SubmissionCompleted(Err(err)) => {
                    drained.msgs.push(Msg::SubmissionFailed(err.to_string()));
                }
                EngineEvent::Status(Ok(status)) => {
                    drained.msgs.push(Msg::StatusReceived(map_status(status)));
                }
                EngineEvent::Status(Err(err)) => {
                    drained.msgs.push(Msg::StatusFailed(err.to_string()));
                }
                EngineEvent::ResultsLoaded { request_id, result } => {
                    let (offset, limit) = self
                        .pending_pages
                        .remove(&request_id)
                        .unwrap_or((0, 0));
                    drained
                        .msgs
                        .push(map_results(request_id, offset, limit, result));
                }
                EngineEvent::DownloadCompleted(Ok(path)) => {
                    drained.notes.push(format!("CSV saved to {}", path.display()));
                }
                EngineEvent::DownloadCompleted(Err(err)) => {
                    crawler_warn!("Download failed: {}", err);
                    drained.notes.push(format!("CSV download failed: {err}"));
                }
            }
        }
        drained
    }
}

fn to_crawl_request(spec: JobSpec) -> CrawlRequest {
    CrawlRequest {
        keywords: spec.keywords,
        confs: spec.venue_ids,
        year_start: spec.year_start,
    }
}

fn map_categories(categories: Vec<WireCategory>) -> Vec<CategoryGroup> {
    categories
        .into_iter()
        .map(|category| CategoryGroup {
            name: category.name,
            conferences: category
                .conferences
                .into_iter()
                .map(|venue| VenueRef::new(venue.value, venue.name))
                .collect(),
        })
        .collect()
}

fn map_status(status: StatusResponse) -> StatusReport {
    StatusReport {
        completed: status.completed,
        paper_count: status.paper_count,
        error: status.error,
    }
}

fn map_results(
    request_id: RequestId,
    offset: usize,
    limit: usize,
    result: Result<ResultsResponse, ApiError>,
) -> Msg {
    match result {
        Ok(response) => Msg::ResultsLoaded {
            request_id,
            page: ResultPage {
                records: response.results.into_iter().map(map_record).collect(),
                total_count: response.total,
                offset,
                limit,
            },
        },
        Err(err) => Msg::ResultsFailed {
            request_id,
            message: err.to_string(),
        },
    }
}

fn map_record(record: PaperRecord) -> ResultRecord {
    ResultRecord {
        title: record.title,
        authors: record.authors,
        venue: record.venue,
        year: record.year,
    }
}

/// Where CSV exports land, relative to the working directory unless absolute.
pub(crate) fn resolve_output_dir(configured: &std::path::Path) -> PathBuf {
    if configured.is_absolute() {
        return configured.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(configured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawler_engine::{FailureKind, WireVenue};

    #[test]
    fn categories_keep_order() {
        let groups = map_categories(vec![WireCategory {
            name: "AI".to_string(),
            conferences: vec![
                WireVenue {
                    value: "aaai".to_string(),
                    name: "AAAI".to_string(),
                },
                WireVenue {
                    value: "ijcai".to_string(),
                    name: "IJCAI".to_string(),
                },
            ],
        }]);
        assert_eq!(groups[0].conferences[1], VenueRef::new("ijcai", "IJCAI"));
    }

    #[test]
    fn results_carry_request_window() {
        let msg = map_results(
            4,
            20,
            10,
            Ok(ResultsResponse {
                results: Vec::new(),
                total: 33,
            }),
        );
        assert_eq!(
            msg,
            Msg::ResultsLoaded {
                request_id: 4,
                page: ResultPage {
                    records: Vec::new(),
                    total_count: 33,
                    offset: 20,
                    limit: 10,
                },
            }
        );
    }

    #[test]
    fn failed_results_keep_request_id() {
        let msg = map_results(
            9,
            0,
            10,
            Err(ApiError {
                kind: FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".to_string(),
            }),
        );
        assert!(matches!(msg, Msg::ResultsFailed { request_id: 9, .. }));
    }

    #[test]
    fn job_spec_maps_to_backend_field_names() {
        let request = to_crawl_request(JobSpec {
            keywords: vec!["ml".to_string()],
            venue_ids: vec!["aaai".to_string()],
            year_start: 2020,
        });
        assert_eq!(request.confs, vec!["aaai".to_string()]);
        assert_eq!(request.year_start, 2020);
    }
}
