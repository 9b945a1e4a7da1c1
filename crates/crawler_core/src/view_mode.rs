use crate::JobLifecycleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Search,
    Results,
}

/// The results view unlocks once a job has completed in this session or any
/// results have been loaded.
pub fn results_selectable(
    lifecycle: &JobLifecycleState,
    completed_once: bool,
    results_total: u64,
) -> bool {
    completed_once || matches!(lifecycle, JobLifecycleState::Completed { .. }) || results_total > 0
}

/// Resolves the requested view against what is currently selectable.
pub fn select_view(
    requested: ViewMode,
    lifecycle: &JobLifecycleState,
    completed_once: bool,
    results_total: u64,
) -> ViewMode {
    match requested {
        ViewMode::Results if results_selectable(lifecycle, completed_once, results_total) => {
            ViewMode::Results
        }
        _ => ViewMode::Search,
    }
}
