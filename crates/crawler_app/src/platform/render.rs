use std::fmt::Write;

use crawler_core::{AppViewModel, CatalogStatus, JobLifecycleState, Notice, ViewMode};

/// Renders the view model as plain text.
pub(crate) fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let tabs = match (view.view_mode, view.results_tab_enabled) {
        (ViewMode::Search, true) => "[Search]  Results",
        (ViewMode::Search, false) => "[Search]  (Results)",
        (ViewMode::Results, _) => " Search  [Results]",
    };
    let _ = writeln!(out, "== DBLP Conference Paper Crawler == {tabs}");
    let _ = writeln!(out, "Status: {}", lifecycle_label(&view.lifecycle));

    match view.view_mode {
        ViewMode::Search => render_search(&mut out, view),
        ViewMode::Results => render_results(&mut out, view),
    }

    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{}", notice_line(notice));
    }
    out
}

fn render_search(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(out, "Keywords: {}", view.keywords);
    let _ = writeln!(out, "Start year: {}", view.year_start);

    match view.catalog_status {
        CatalogStatus::NotLoaded => {
            let _ = writeln!(out, "Categories: loading...");
        }
        CatalogStatus::Unavailable => {
            let _ = writeln!(out, "Categories: unavailable (use `reload`, or `add` venues by hand)");
        }
        CatalogStatus::Loaded => {
            let _ = writeln!(out, "Categories:");
            for row in &view.categories {
                let mark = if row.checked { "x" } else { " " };
                let _ = writeln!(out, "  [{mark}] {} ({} venues)", row.name, row.venue_count);
            }
        }
    }

    if view.venues.is_empty() {
        let _ = writeln!(out, "Selected conferences: none");
    } else {
        let labels: Vec<&str> = view.venues.iter().map(|chip| chip.label.as_str()).collect();
        let _ = writeln!(out, "Selected conferences: {}", labels.join(", "));
    }

    let start = if view.start_enabled {
        "start"
    } else {
        "start (disabled while crawling)"
    };
    let _ = write!(out, "Actions: {start}");
    if view.download_available {
        let _ = write!(out, ", download");
    }
    let _ = writeln!(out);
}

fn render_results(out: &mut String, view: &AppViewModel) {
    let results = &view.results;
    let _ = writeln!(
        out,
        "Results: {} papers, page {}/{} ({} per page){}",
        results.total,
        results.page_index + 1,
        results.page_count.max(1),
        results.page_size,
        if results.loading { " loading..." } else { "" }
    );
    let first = results.page_index * results.page_size;
    for (index, row) in results.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}. {} | {} | {} | {}",
            first + index + 1,
            row.title,
            row.authors,
            row.venue,
            row.year
        );
    }
    let _ = writeln!(out, "Actions: page <n>, size <10|25|50>, download, view search");
}

fn lifecycle_label(state: &JobLifecycleState) -> String {
    match state {
        JobLifecycleState::Idle => "idle".to_string(),
        JobLifecycleState::Submitting => "starting crawl...".to_string(),
        JobLifecycleState::Polling => "crawling...".to_string(),
        JobLifecycleState::Completed { paper_count } => format!("completed ({paper_count} papers)"),
        JobLifecycleState::Failed { message } => format!("failed ({message})"),
    }
}

fn notice_line(notice: &Notice) -> String {
    let tag = if notice.is_error() { "ERROR" } else { "OK" };
    format!("{tag}: {}", notice.text())
}
