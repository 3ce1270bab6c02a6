use crate::core::description::{parse_catalog, parse_service_provider};
use crate::core::dialog::MessageBus;
use crate::core::document::Document;
use crate::core::resolver::{resolve, CapabilityRequest};
use crate::domain::model::{
    Capability, CapabilityKind, HttpMethod, HttpRequest, HttpResponse, ServiceProvider,
};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::domain::vocab::*;
use crate::utils::error::{OslcError, Result};

/// Speaks OSLC to one or more providers over a `Transport`.
///
/// Every lookup fetches the provider document again; nothing is cached.
pub struct OslcClient<T: Transport> {
    transport: T,
    oslc_version: String,
    extra_headers: Vec<(String, String)>,
    bus: MessageBus,
}

impl<T: Transport> OslcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            oslc_version: DEFAULT_OSLC_VERSION.to_string(),
            extra_headers: Vec::new(),
            bus: MessageBus::global().clone(),
        }
    }

    pub fn from_config<C: ConfigProvider>(transport: T, config: &C) -> Self {
        Self::new(transport)
            .with_version(config.oslc_version())
            .with_headers(config.extra_headers())
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.oslc_version = version.into();
        self
    }

    /// Headers sent with every request (e.g. CSRF tokens some providers require).
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.extra_headers = headers;
        self
    }

    pub fn with_message_bus(mut self, bus: MessageBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn oslc_version(&self) -> &str {
        &self.oslc_version
    }

    pub fn message_bus(&self) -> &MessageBus {
        &self.bus
    }

    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        for (name, value) in &self.extra_headers {
            if request.header(name).is_none() {
                request.headers.push((name.clone(), value.clone()));
            }
        }

        let method = request.method;
        let url = request.url.clone();
        tracing::debug!("📡 {} {}", method, url);

        let response = self.transport.send(request).await?;
        tracing::debug!("📡 {} {} -> {}", method, url, response.status);

        if !response.is_success() {
            return Err(OslcError::HttpStatus {
                method: method.to_string(),
                url,
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    /// GET `url`. `media_type` defaults to RDF/XML; the version header can be
    /// suppressed for providers that mishandle it on cross-origin requests.
    pub async fn get_resource(
        &self,
        url: &str,
        media_type: Option<&str>,
        send_version_header: bool,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(HttpMethod::Get, url)
            .with_header(HEADER_ACCEPT, media_type.unwrap_or(MEDIA_RDF_XML));
        if send_version_header {
            request = request.with_header(HEADER_OSLC_CORE_VERSION, self.oslc_version.as_str());
        }
        self.execute(request).await
    }

    pub async fn create_resource(
        &self,
        url: &str,
        resource: &str,
        media_type: Option<&str>,
        accept_type: Option<&str>,
    ) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Post, url)
            .with_header(HEADER_ACCEPT, accept_type.unwrap_or(MEDIA_RDF_XML))
            .with_header(HEADER_CONTENT_TYPE, media_type.unwrap_or(MEDIA_RDF_XML))
            .with_header(HEADER_OSLC_CORE_VERSION, self.oslc_version.as_str())
            // IBM RTC refuses creation without it
            .with_header(HEADER_REQUESTED_WITH, "XMLHttpRequest")
            .with_body(resource);
        let response = self.execute(request).await?;
        tracing::info!(
            "✅ Created resource via {} at {}",
            url,
            response.location().unwrap_or("<no Location>")
        );
        Ok(response)
    }

    pub async fn update_resource(
        &self,
        url: &str,
        resource: &str,
        media_type: Option<&str>,
        accept_type: Option<&str>,
        if_match: Option<&str>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(HttpMethod::Put, url);
        if let Some(etag) = if_match {
            request = request.with_header(HEADER_IF_MATCH, etag);
        }
        let request = request
            .with_header(HEADER_ACCEPT, accept_type.unwrap_or(MEDIA_RDF_XML))
            .with_header(HEADER_CONTENT_TYPE, media_type.unwrap_or(MEDIA_RDF_XML))
            .with_header(HEADER_OSLC_CORE_VERSION, self.oslc_version.as_str())
            .with_body(resource);
        self.execute(request).await
    }

    pub async fn delete_resource(&self, url: &str) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Delete, url)
            .with_header(HEADER_OSLC_CORE_VERSION, self.oslc_version.as_str());
        self.execute(request).await
    }

    /// GET an RDF/XML resource and parse it.
    pub async fn get_document(&self, url: &str) -> Result<Document> {
        let response = self.get_resource(url, Some(MEDIA_RDF_XML), true).await?;
        Document::parse(&response.body)
    }

    pub async fn fetch_service_provider(&self, service_provider_url: &str) -> Result<ServiceProvider> {
        let doc = self.get_document(service_provider_url).await?;
        Ok(parse_service_provider(&doc))
    }

    /// `rdf:about` of the first catalog entry titled `title`.
    pub async fn lookup_service_provider_url(
        &self,
        catalog_url: &str,
        title: &str,
    ) -> Result<Option<String>> {
        let doc = self.get_document(catalog_url).await?;
        let found = parse_catalog(&doc)
            .into_iter()
            .find(|entry| entry.title == title)
            .map(|entry| entry.about);

        match &found {
            Some(url) => tracing::info!("🔎 Service provider '{}' -> {}", title, url),
            None => tracing::info!("🔎 No service provider titled '{}' in {}", title, catalog_url),
        }
        Ok(found)
    }

    pub async fn lookup_capability(
        &self,
        service_provider_url: &str,
        request: &CapabilityRequest<'_>,
    ) -> Result<Option<Capability>> {
        let provider = self.fetch_service_provider(service_provider_url).await?;
        let capability = resolve(&provider, request).cloned();
        if capability.is_none() {
            tracing::info!(
                "🔎 {} not advertised by {} for domain {}",
                request.kind,
                service_provider_url,
                request.domain
            );
        }
        Ok(capability)
    }

    /// `oslc:queryBase` of the best query capability.
    pub async fn lookup_query_capability_uri(
        &self,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
    ) -> Result<Option<String>> {
        let request = CapabilityRequest::new(CapabilityKind::QueryCapability, domain)
            .resource_type(resource_type);
        Ok(self
            .lookup_capability(service_provider_url, &request)
            .await?
            .map(|c| c.action))
    }

    pub async fn lookup_creation_factory(
        &self,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
        usage: Option<&str>,
    ) -> Result<Option<Capability>> {
        let request = CapabilityRequest::new(CapabilityKind::CreationFactory, domain)
            .resource_type(resource_type)
            .usage(usage);
        self.lookup_capability(service_provider_url, &request).await
    }

    /// `oslc:creation` of the best creation factory.
    pub async fn lookup_creation_factory_uri(
        &self,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
        usage: Option<&str>,
    ) -> Result<Option<String>> {
        Ok(self
            .lookup_creation_factory(service_provider_url, domain, resource_type, usage)
            .await?
            .map(|c| c.action))
    }

    pub async fn lookup_creation_dialog(
        &self,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
    ) -> Result<Option<Capability>> {
        let request = CapabilityRequest::new(CapabilityKind::CreationDialog, domain)
            .resource_type(resource_type);
        self.lookup_capability(service_provider_url, &request).await
    }

    pub async fn lookup_selection_dialog(
        &self,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
    ) -> Result<Option<Capability>> {
        let request = CapabilityRequest::new(CapabilityKind::SelectionDialog, domain)
            .resource_type(resource_type);
        self.lookup_capability(service_provider_url, &request).await
    }
}
