//! Aptos REST client for reading account resources

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder, Url};
use tracing::{debug, info};

use super::dex_structures::RawResource;
use crate::shared::errors::FetchError;
use crate::shared::types::AccountAddress;
use crate::shared::utils::format_address;

pub const APTOS_MAINNET_URL: &str = "https://fullnode.mainnet.aptoslabs.com";

/// Response header carrying the cursor of the next resource page
const CURSOR_HEADER: &str = "x-aptos-cursor";

/// Reads every resource stored under an account
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, account: &AccountAddress) -> Result<Vec<RawResource>, FetchError>;
}

/// Aptos fullnode REST client wrapper
#[derive(Debug, Clone)]
pub struct AptosRpcClient {
    http_client: Client,
    url: Url,
    page_limit: u32,
}

impl AptosRpcClient {
    pub const DEFAULT_PAGE_LIMIT: u32 = 1000;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_uri: &str, timeout: Duration, page_limit: u32) -> Result<Self, FetchError> {
        let url = base_uri
            .trim_end_matches('/')
            .parse::<Url>()
            .map_err(|e| FetchError::UrlParsing(base_uri.to_string(), e.to_string()))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http_client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::HttpClient(e.to_string(), e))?;

        Ok(Self { http_client, url, page_limit: page_limit.max(1) })
    }

    /// Create default client (mainnet)
    pub fn new_mainnet() -> Result<Self, FetchError> {
        Self::new(APTOS_MAINNET_URL, Self::DEFAULT_TIMEOUT, Self::DEFAULT_PAGE_LIMIT)
    }

    fn resources_url(&self, account: &AccountAddress) -> Result<Url, FetchError> {
        let raw = format!("{}/v1/accounts/{}/resources", self.url.as_str().trim_end_matches('/'), account);
        raw.parse::<Url>()
            .map_err(|e| FetchError::UrlParsing(raw, e.to_string()))
    }

    /// Fetch one page; returns the resources and the cursor of the next page, if any
    async fn fetch_page(
        &self,
        url: &Url,
        cursor: Option<&str>,
    ) -> Result<(Vec<RawResource>, Option<String>), FetchError> {
        let mut request = self
            .http_client
            .get(url.clone())
            .query(&[("limit", self.page_limit.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::HttpClient(e.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16(), body });
        }

        let next_cursor = response
            .headers()
            .get(CURSOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .filter(|c| !c.is_empty());

        let resources = response
            .json::<Vec<RawResource>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok((resources, next_cursor))
    }
}

#[async_trait]
impl ResourceFetcher for AptosRpcClient {
    async fn fetch(&self, account: &AccountAddress) -> Result<Vec<RawResource>, FetchError> {
        let url = self.resources_url(account)?;
        info!("Fetching resources of {}", format_address(account.as_str()));

        let mut resources = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let (page, next) = self.fetch_page(&url, cursor.as_deref()).await?;
            debug!("Fetched page of {} resources, next cursor: {:?}", page.len(), next);
            resources.extend(page);

            match next {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                Some(next) => {
                    return Err(FetchError::Decode(format!("node repeated cursor {next}")));
                }
                None => break,
            }
        }

        info!("✅ Fetched {} resources from {}", resources.len(), format_address(account.as_str()));
        Ok(resources)
    }
}
