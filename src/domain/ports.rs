use crate::domain::model::{EmbeddedPage, HttpRequest, HttpResponse, PageId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Wire-level HTTP. Implementations attach credentials but never OSLC headers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Hosts provider dialog pages (modal, iframe, webview, ...).
///
/// The host forwards page messages with `MessageBus::post` and reports a user
/// dismissal with `MessageBus::close`.
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn present(&self, page: &EmbeddedPage) -> Result<()>;
    async fn dismiss(&self, page: &PageId) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn oslc_version(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn user_agent(&self) -> Option<&str>;
    fn credentials(&self) -> Option<(&str, &str)>;
    fn extra_headers(&self) -> Vec<(String, String)>;
}
