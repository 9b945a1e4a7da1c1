use thiserror::Error;

/// Start year shown in a fresh form.
pub const DEFAULT_YEAR_START: i32 = 2023;

/// Validated crawl submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub keywords: Vec<String>,
    pub venue_ids: Vec<String>,
    pub year_start: i32,
}

/// Input problems that block submission. Display text is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least one keyword")]
    EmptyKeywords,
    #[error("Please select at least one conference")]
    NoVenuesSelected,
    #[error("Please enter a valid start year")]
    InvalidYearStart(String),
}

/// Builds a [`JobSpec`] from raw form input. Pure; never touches the network.
pub fn build_job_spec(
    keywords_raw: &str,
    venue_ids: &[String],
    year_start: &str,
) -> Result<JobSpec, ValidationError> {
    let keywords = parse_keywords(keywords_raw);
    if keywords.is_empty() {
        return Err(ValidationError::EmptyKeywords);
    }
    if venue_ids.is_empty() {
        return Err(ValidationError::NoVenuesSelected);
    }
    let year_start = year_start
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidYearStart(year_start.to_string()))?;

    Ok(JobSpec {
        keywords,
        venue_ids: venue_ids.to_vec(),
        year_start,
    })
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
