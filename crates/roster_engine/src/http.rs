use std::marker::PhantomData;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Url;
use roster_core::{PageRequest, PageResult};
use roster_logging::roster_debug;
use serde::de::DeserializeOwned;

use crate::{FailureKind, FetchError, PageSource};

/// Query parameter names understood by the remote listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub page: String,
    pub limit: String,
    pub search: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            limit: "limit".to_string(),
            search: "name".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub params: QueryParams,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: "https://dragonball-api.com/api/characters".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            params: QueryParams::default(),
        }
    }
}

/// Fetches pages from a JSON listing endpoint over HTTP.
///
/// The endpoint may answer with `{ "items": [...], "meta": {...} }` or with a
/// bare array (typical for filtered searches); both are classified by
/// [`PageResult::from_slice`].
#[derive(Debug, Clone)]
pub struct HttpPageSource<T> {
    settings: HttpSettings,
    client: reqwest::Client,
    _entity: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    pub fn new(settings: HttpSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            client,
            _entity: PhantomData,
        })
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    /// Full request URL for a page; the search parameter is omitted when the
    /// query is empty.
    pub fn request_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let params = &self.settings.params;
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(&params.page, &request.page.to_string());
            pairs.append_pair(&params.limit, &request.page_size.to_string());
            if !request.query.is_empty() {
                pairs.append_pair(&params.search, &request.query);
            }
        }
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl<T> PageSource<T> for HttpPageSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<T>, FetchError> {
        let url = self.request_url(request)?;
        roster_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        roster_debug!("page {} body {} bytes", request.page, body.len());
        PageResult::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
