use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as handed to the transport. Headers are already OSLC-complete.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header(crate::domain::vocab::HEADER_LOCATION)
    }

    pub fn etag(&self) -> Option<&str> {
        self.header("ETag")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    QueryCapability,
    CreationFactory,
    CreationDialog,
    SelectionDialog,
}

impl CapabilityKind {
    /// `(property, class)` local names as they appear inside an `oslc:Service`.
    pub fn element_path(&self) -> (&'static str, &'static str) {
        match self {
            CapabilityKind::QueryCapability => ("queryCapability", "QueryCapability"),
            CapabilityKind::CreationFactory => ("creationFactory", "CreationFactory"),
            CapabilityKind::CreationDialog => ("creationDialog", "Dialog"),
            CapabilityKind::SelectionDialog => ("selectionDialog", "Dialog"),
        }
    }

    /// Local name of the property carrying the action URI.
    pub fn action_property(&self) -> &'static str {
        use crate::domain::vocab::{EL_CREATION, EL_DIALOG_ACTION, EL_QUERY_BASE};
        match self {
            CapabilityKind::QueryCapability => EL_QUERY_BASE,
            CapabilityKind::CreationFactory => EL_CREATION,
            CapabilityKind::CreationDialog | CapabilityKind::SelectionDialog => EL_DIALOG_ACTION,
        }
    }

    pub fn is_dialog(&self) -> bool {
        matches!(
            self,
            CapabilityKind::CreationDialog | CapabilityKind::SelectionDialog
        )
    }

    pub const ALL: [CapabilityKind; 4] = [
        CapabilityKind::QueryCapability,
        CapabilityKind::CreationFactory,
        CapabilityKind::CreationDialog,
        CapabilityKind::SelectionDialog,
    ];
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::QueryCapability => "query capability",
            CapabilityKind::CreationFactory => "creation factory",
            CapabilityKind::CreationDialog => "creation dialog",
            CapabilityKind::SelectionDialog => "selection dialog",
        };
        f.write_str(name)
    }
}

/// One advertised capability inside a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub kind: CapabilityKind,
    pub title: Option<String>,
    pub label: Option<String>,
    /// queryBase, creation or dialog URI; empty when the provider omitted it.
    pub action: String,
    pub resource_types: Vec<String>,
    pub usages: Vec<String>,
    pub hint_width: Option<u32>,
    pub hint_height: Option<u32>,
}

impl Capability {
    pub fn new(kind: CapabilityKind, action: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            label: None,
            action: action.into(),
            resource_types: Vec::new(),
            usages: Vec::new(),
            hint_width: None,
            hint_height: None,
        }
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_types.push(resource_type.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usages.push(usage.into());
        self
    }

    pub fn applies_to(&self, resource_type: &str) -> bool {
        self.resource_types.iter().any(|t| t == resource_type)
    }

    pub fn has_usage(&self, usage: &str) -> bool {
        self.usages.iter().any(|u| u == usage)
    }

    pub fn is_default(&self) -> bool {
        self.has_usage(crate::domain::vocab::USAGE_DEFAULT)
    }

    pub fn is_untyped(&self) -> bool {
        self.resource_types.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub domain: String,
    pub capabilities: Vec<Capability>,
}

impl Service {
    pub fn capabilities_of(&self, kind: CapabilityKind) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter().filter(move |c| c.kind == kind)
    }
}

/// Parsed form of a service-provider description document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub about: Option<String>,
    pub title: Option<String>,
    pub services: Vec<Service>,
}

/// One `oslc:ServiceProvider` listed in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub about: String,
    pub title: String,
}

/// Identity of one embedded dialog page; listeners are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oslc-dialog-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedPage {
    pub id: PageId,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// The user picked or created resources; never empty.
    Completed(Vec<serde_json::Value>),
    /// The page answered but with no results (or an unreadable envelope).
    NothingSelected,
    /// The presentation was dismissed before the page answered.
    Cancelled,
    /// The provider does not advertise a matching dialog.
    NotAdvertised,
}

impl DialogOutcome {
    pub fn results(&self) -> Option<&[serde_json::Value]> {
        match self {
            DialogOutcome::Completed(results) => Some(results),
            _ => None,
        }
    }
}
