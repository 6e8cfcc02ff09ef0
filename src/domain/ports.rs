use crate::domain::model::{CompanyReviewsResponse, CompanySearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Persistent key/value slot storage. A value is always replaced as a whole.
pub trait KeyValueStore: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_host(&self) -> &str;
    fn api_key(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn search_companies(&self, query: &str) -> Result<CompanySearchResponse>;
    async fn fetch_company_reviews(&self, domain: &str, page: u32)
        -> Result<CompanyReviewsResponse>;
}
