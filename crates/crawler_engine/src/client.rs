use std::path::PathBuf;
use std::time::Duration;

use crawler_logging::{crawler_debug, crawler_info};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::CategoriesResponse;
use crate::{
    ApiError, CrawlRequest, CsvExport, FailureKind, ResultsResponse, StatusResponse,
    WireCategory,
};

/// Connection settings shared by every backend call.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub max_download_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(2),
            max_download_bytes: 64 * 1024 * 1024,
        }
    }
}

/// The crawl backend's HTTP contract.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `GET /conferences`
    async fn conferences(&self) -> Result<Vec<WireCategory>, ApiError>;
    /// `POST /crawl`
    async fn submit_crawl(&self, request: &CrawlRequest) -> Result<(), ApiError>;
    /// `GET /status`
    async fn status(&self) -> Result<StatusResponse, ApiError>;
    /// `GET /results?limit=&offset=`
    async fn results(&self, offset: usize, limit: usize) -> Result<ResultsResponse, ApiError>;
    /// `GET /download`, streamed into `export` as `filename`.
    async fn download_csv(
        &self,
        export: &CsvExport,
        filename: &str,
    ) -> Result<PathBuf, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, client })
    }

    /// Absolute URL for an endpoint below the configured base.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        crawler_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn conferences(&self) -> Result<Vec<WireCategory>, ApiError> {
        let url = self.endpoint("conferences")?;
        let response: CategoriesResponse = self.get_json(url).await?;
        crawler_info!("Loaded {} conference categories", response.categories.len());
        Ok(response.categories)
    }

    async fn submit_crawl(&self, request: &CrawlRequest) -> Result<(), ApiError> {
        let url = self.endpoint("crawl")?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        crawler_info!(
            "POST {} keywords={} confs={} year_start={}",
            url,
            request.keywords.len(),
            request.confs.len(),
            request.year_start
        );
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response)?;
        Ok(())
    }

    async fn status(&self) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint("status")?;
        self.get_json(url).await
    }

    async fn results(&self, offset: usize, limit: usize) -> Result<ResultsResponse, ApiError> {
        let mut url = self.endpoint("results")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        self.get_json(url).await
    }

    async fn download_csv(
        &self,
        export: &CsvExport,
        filename: &str,
    ) -> Result<PathBuf, ApiError> {
        let url = self.endpoint("download")?;
        crawler_info!("GET {} -> {}", url, filename);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let response = check_status(response)?;

        let declared_len = response.content_length();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_reqwest_error));
        Ok(export.save(filename, declared_len, body).await?)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    // A trailing slash keeps any path prefix when joining endpoints.
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url =
        Url::parse(&raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::new(FailureKind::InvalidUrl, "base url cannot be a base"));
    }
    Ok(url)
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
