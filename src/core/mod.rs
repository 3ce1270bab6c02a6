pub mod client;
pub mod description;
pub mod dialog;
pub mod document;
pub mod query;
pub mod resolver;

pub use crate::domain::model::{
    Capability, CapabilityKind, DialogOutcome, EmbeddedPage, HttpMethod, HttpRequest,
    HttpResponse, PageId, ProviderEntry, Service, ServiceProvider,
};
pub use crate::domain::ports::{ConfigProvider, Presenter, Transport};
pub use crate::utils::error::Result;
