/// Shown when the backend did not accept a crawl job.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to start crawling. Please check server connection.";
/// Shown when a status request failed at the transport level.
pub const STATUS_CHECK_FAILED_MESSAGE: &str = "Failed to check crawl status.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobLifecycleState {
    #[default]
    Idle,
    Submitting,
    Polling,
    Completed {
        paper_count: u64,
    },
    Failed {
        message: String,
    },
}

impl JobLifecycleState {
    /// Submitting or Polling: the start action is disabled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting | Self::Polling)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

/// One `/status` response as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusReport {
    pub completed: bool,
    pub paper_count: Option<u64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Pending,
    Completed { paper_count: u64 },
    Failed { message: String },
}

impl StatusReport {
    /// Completion wins over a simultaneously reported error.
    pub fn outcome(&self) -> StatusOutcome {
        if self.completed {
            StatusOutcome::Completed {
                paper_count: self.paper_count.unwrap_or(0),
            }
        } else if let Some(message) = &self.error {
            StatusOutcome::Failed {
                message: message.clone(),
            }
        } else {
            StatusOutcome::Pending
        }
    }
}

/// Owns the lifecycle of the single crawl job this client may run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobController {
    state: JobLifecycleState,
    completed_once: bool,
    attempts: u64,
}

impl JobController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &JobLifecycleState {
        &self.state
    }

    /// Whether any job reached `Completed` during this session.
    pub fn completed_once(&self) -> bool {
        self.completed_once
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Idle/Completed/Failed -> Submitting. Discards the previous outcome.
    pub fn begin(&mut self) -> bool {
        if self.state.is_in_flight() {
            return false;
        }
        self.attempts += 1;
        self.state = JobLifecycleState::Submitting;
        true
    }

    /// Submitting -> Polling.
    pub fn accept(&mut self) -> bool {
        if self.state != JobLifecycleState::Submitting {
            return false;
        }
        self.state = JobLifecycleState::Polling;
        true
    }

    /// Submitting -> Failed with the generic start notice.
    pub fn reject(&mut self) -> bool {
        if self.state != JobLifecycleState::Submitting {
            return false;
        }
        self.state = JobLifecycleState::Failed {
            message: SUBMIT_FAILED_MESSAGE.to_string(),
        };
        true
    }

    /// Applies a poll response. Returns the terminal outcome when the job left
    /// Polling; `None` for pending reports or reports arriving outside Polling.
    pub fn apply_status(&mut self, report: &StatusReport) -> Option<StatusOutcome> {
        if self.state != JobLifecycleState::Polling {
            return None;
        }
        match report.outcome() {
            StatusOutcome::Pending => None,
            StatusOutcome::Completed { paper_count } => {
                self.state = JobLifecycleState::Completed { paper_count };
                self.completed_once = true;
                Some(StatusOutcome::Completed { paper_count })
            }
            StatusOutcome::Failed { message } => {
                self.state = JobLifecycleState::Failed {
                    message: message.clone(),
                };
                Some(StatusOutcome::Failed { message })
            }
        }
    }

    /// Polling -> Failed after a transport-level status failure.
    pub fn poll_failed(&mut self) -> bool {
        if self.state != JobLifecycleState::Polling {
            return false;
        }
        self.state = JobLifecycleState::Failed {
            message: STATUS_CHECK_FAILED_MESSAGE.to_string(),
        };
        true
    }
}
