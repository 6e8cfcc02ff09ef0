use crate::core::{CompanyDirectory, ConfigProvider};
use crate::domain::model::{CompanyReviewsResponse, CompanySearchResponse};
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;

pub const DEFAULT_REVIEW_PAGE: u32 = 1;

const SEARCH_PATH: &str = "/company-search";
const REVIEWS_PATH: &str = "/company-reviews";
const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

/// HTTP client for the company review API.
///
/// Holds no state besides the reusable connection client: no caching, no
/// retries. Failures are logged once and handed back to the caller.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

fn header_value(field: &str, value: &str, sensitive: bool) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|e| {
        FinderError::InvalidConfigValueError {
            field: field.to_string(),
            value: if sensitive {
                "<redacted>".to_string()
            } else {
                value.to_string()
            },
            reason: format!("Not a valid HTTP header value: {}", e),
        }
    })?;
    header.set_sensitive(sensitive);
    Ok(header)
}

impl DirectoryClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(HOST_HEADER, header_value("api_host", config.api_host(), false)?);
        headers.insert(KEY_HEADER, header_value("api_key", config.api_key(), true)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("[{}] GET {} {:?}", operation, url, query);

        let response = match self.client.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API Error [{}]: {}", operation, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        tracing::debug!("[{}] response status: {}", operation, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API Error [{}]: HTTP {} {}", operation, status.as_u16(), body);
            return Err(FinderError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("API Error [{}]: could not decode body: {}", operation, e);
            e.into()
        })
    }
}

#[async_trait]
impl CompanyDirectory for DirectoryClient {
    async fn search_companies(&self, query: &str) -> Result<CompanySearchResponse> {
        self.get_json("search_companies", SEARCH_PATH, &[("query", query.to_string())])
            .await
    }

    async fn fetch_company_reviews(
        &self,
        domain: &str,
        page: u32,
    ) -> Result<CompanyReviewsResponse> {
        if page == 0 {
            return Err(FinderError::ValidationError {
                message: "Review pages start at 1".to_string(),
            });
        }

        self.get_json(
            "fetch_company_reviews",
            REVIEWS_PATH,
            &[
                ("company_domain", domain.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }
}
