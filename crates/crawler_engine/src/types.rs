use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireVenue {
    pub value: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireCategory {
    pub name: String,
    #[serde(default)]
    pub conferences: Vec<WireVenue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<WireCategory>,
}

/// Body of `POST /crawl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRequest {
    pub keywords: Vec<String>,
    pub confs: Vec<String>,
    pub year_start: i32,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub paper_count: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Completed or backend-reported failure; no further polls are needed.
    pub fn is_terminal(&self) -> bool {
        self.completed || self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaperRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: i32,
}

/// Body of `GET /results`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ResultsResponse {
    #[serde(default)]
    pub results: Vec<PaperRecord>,
    #[serde(default)]
    pub total: u64,
}

// CSV-backed results may carry the year as text, or as a float when the
// column had gaps.
fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Year>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Year::Number(year)) => i32::try_from(year).map_err(serde::de::Error::custom),
        Some(Year::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(Year::Float(year)) => whole_year(year)
            .ok_or_else(|| serde::de::Error::custom(format!("year {year} is not a whole number"))),
        Some(Year::Text(text)) => {
            let text = text.trim();
            text.parse()
                .ok()
                .or_else(|| text.parse().ok().and_then(whole_year))
                .ok_or_else(|| serde::de::Error::custom(format!("invalid year {text:?}")))
        }
    }
}

fn whole_year(year: f64) -> Option<i32> {
    let in_range = year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX);
    (year.fract() == 0.0 && in_range).then_some(year as i32)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CatalogLoaded(Result<Vec<WireCategory>, ApiError>),
    SubmissionCompleted(Result<(), ApiError>),
    Status(Result<StatusResponse, ApiError>),
    ResultsLoaded {
        request_id: u64,
        result: Result<ResultsResponse, ApiError>,
    },
    DownloadCompleted(Result<PathBuf, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_missing_fields() {
        let status: StatusResponse = serde_json::from_str(r#"{"completed": false}"#).unwrap();
        assert_eq!(status, StatusResponse::default());
        assert!(!status.is_terminal());

        let status: StatusResponse =
            serde_json::from_str(r#"{"completed": false, "error": "timeout"}"#).unwrap();
        assert!(status.is_terminal());
    }

    #[test]
    fn year_accepts_number_or_text() {
        let record: PaperRecord = serde_json::from_str(
            r#"{"title": "T", "authors": "A", "venue": "aaai", "year": "2021"}"#,
        )
        .unwrap();
        assert_eq!(record.year, 2021);

        let record: PaperRecord =
            serde_json::from_str(r#"{"title": "T", "year": 2019}"#).unwrap();
        assert_eq!(record.year, 2019);
        assert_eq!(record.authors, "");
    }

    #[test]
    fn year_accepts_whole_floats() {
        let record: PaperRecord =
            serde_json::from_str(r#"{"title": "T", "year": 2021.0}"#).unwrap();
        assert_eq!(record.year, 2021);

        let record: PaperRecord = serde_json::from_str(r#"{"year": "2018.0"}"#).unwrap();
        assert_eq!(record.year, 2018);

        assert!(serde_json::from_str::<PaperRecord>(r#"{"year": 2021.5}"#).is_err());
        assert!(serde_json::from_str::<PaperRecord>(r#"{"year": 1e12}"#).is_err());
        assert!(serde_json::from_str::<PaperRecord>(r#"{"year": "soon"}"#).is_err());
    }

    #[test]
    fn crawl_request_uses_backend_field_names() {
        let body = serde_json::to_value(CrawlRequest {
            keywords: vec!["ml".to_string()],
            confs: vec!["aaai".to_string()],
            year_start: 2020,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"keywords": ["ml"], "confs": ["aaai"], "year_start": 2020})
        );
    }
}
