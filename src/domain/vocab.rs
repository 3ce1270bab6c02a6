//! OSLC / RDF vocabulary used when reading provider documents and talking to providers.

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Usage tag marking a capability as the domain's fallback.
pub const USAGE_DEFAULT: &str = "http://open-services.net/ns/core#default";

// Element local names (matched with or without the `oslc:` prefix)
pub const EL_SERVICE_PROVIDER_CATALOG: &str = "ServiceProviderCatalog";
pub const EL_SERVICE_PROVIDER_REF: &str = "serviceProvider";
pub const EL_SERVICE_PROVIDER: &str = "ServiceProvider";
pub const EL_SERVICE_REF: &str = "service";
pub const EL_SERVICE: &str = "Service";
pub const EL_DOMAIN: &str = "domain";
pub const EL_RESOURCE_TYPE: &str = "resourceType";
pub const EL_USAGE: &str = "usage";
pub const EL_TITLE: &str = "title";
pub const EL_LABEL: &str = "label";
pub const EL_QUERY_BASE: &str = "queryBase";
pub const EL_CREATION: &str = "creation";
pub const EL_DIALOG_ACTION: &str = "dialog";
pub const EL_HINT_WIDTH: &str = "hintWidth";
pub const EL_HINT_HEIGHT: &str = "hintHeight";
pub const EL_NEXT_PAGE: &str = "nextPage";
pub const EL_MEMBER: &str = "member";

// Attribute local names
pub const ATTR_RESOURCE: &str = "resource";
pub const ATTR_ABOUT: &str = "about";

// Media types
pub const MEDIA_RDF_XML: &str = "application/rdf+xml";
pub const MEDIA_ANY: &str = "*/*";

// Headers
pub const HEADER_OSLC_CORE_VERSION: &str = "OSLC-Core-Version";
pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_IF_MATCH: &str = "If-Match";
pub const HEADER_LOCATION: &str = "Location";
pub const HEADER_REQUESTED_WITH: &str = "X-Requested-With";

pub const DEFAULT_OSLC_VERSION: &str = "2.0";

// Query parameters
pub const PARAM_PAGING: &str = "oslc.paging";
pub const PARAM_PAGE_SIZE: &str = "oslc.pageSize";
pub const PARAM_WHERE: &str = "oslc.where";
pub const PARAM_SELECT: &str = "oslc.select";
pub const PARAM_ORDER_BY: &str = "oslc.orderBy";
pub const PARAM_SEARCH_TERMS: &str = "oslc.searchTerms";
pub const PARAM_PREFIX: &str = "oslc.prefix";

// Dialog protocol
pub const DIALOG_RESPONSE_HEADER: &str = "oslc-response:";
pub const DIALOG_PROTOCOL_FRAGMENT: &str = "#oslc-core-postMessage-1.0";
pub const DIALOG_TITLE: &str = "OSLC Dialog";
