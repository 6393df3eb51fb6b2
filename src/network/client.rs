use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::common::{HealthResponse, ProcessPdfResponse, SearchResponse, SystemInfo};
use crate::config::{AppConfig, SearchMethod};

use super::error::ApiError;

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
}

/// Thin wrapper over the backend's `/api/v1` endpoints. One attempt per call.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    search_method: SearchMethod,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            search_method: config.search_method,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &str, top_k: usize) -> Result<SearchResponse, ApiError> {
        let url = self.endpoint("search");
        let request = match self.search_method {
            SearchMethod::Get => {
                let top_k = top_k.to_string();
                self.client
                    .get(url)
                    .query(&[("query", query), ("top_k", top_k.as_str())])
            }
            SearchMethod::Post => self.client.post(url).json(&SearchRequest { query, top_k }),
        };
        self.send(request).await
    }

    pub async fn process_pdf(&self) -> Result<ProcessPdfResponse, ApiError> {
        self.send(self.client.post(self.endpoint("process-pdf"))).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.send(self.client.get(self.endpoint("health"))).await
    }

    pub async fn system_info(&self) -> Result<SystemInfo, ApiError> {
        self.send(self.client.get(self.endpoint("system"))).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        log::debug!("{} -> {status}", response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        Ok(response.json::<T>().await?)
    }
}
