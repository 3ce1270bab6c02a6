use crate::core::document::{Document, Element};
use crate::domain::model::{Capability, CapabilityKind, ProviderEntry, Service, ServiceProvider};
use crate::domain::vocab::*;

/// Reads a service-provider description into the in-memory model.
///
/// Every `ServiceProvider > service > Service` in the document contributes
/// its services, in document order. Capabilities keep their document order
/// inside each service; the resolver relies on that.
pub fn parse_service_provider(doc: &Document) -> ServiceProvider {
    let mut provider = ServiceProvider::default();

    for sp in doc.find_all(EL_SERVICE_PROVIDER) {
        if provider.about.is_none() {
            provider.about = sp.about().map(str::to_string);
            provider.title = sp.child(EL_TITLE).map(|t| t.text().trim().to_string());
        }

        for service in sp.path(&[EL_SERVICE_REF, EL_SERVICE]) {
            provider.services.push(parse_service(service));
        }
    }

    tracing::debug!(
        "📄 Parsed service provider {:?}: {} services",
        provider.about,
        provider.services.len()
    );
    provider
}

fn parse_service(service: &Element) -> Service {
    let domain = service
        .child(EL_DOMAIN)
        .and_then(|d| d.resource())
        .unwrap_or_default()
        .to_string();

    let mut capabilities = Vec::new();
    // One pass per kind keeps each kind in document order.
    for kind in CapabilityKind::ALL {
        let (property, class) = kind.element_path();
        for node in service.path(&[property, class]) {
            capabilities.push(parse_capability(kind, node));
        }
    }

    Service {
        domain,
        capabilities,
    }
}

fn parse_capability(kind: CapabilityKind, node: &Element) -> Capability {
    let action = node
        .child(kind.action_property())
        .and_then(|a| a.resource())
        .unwrap_or_default()
        .to_string();

    Capability {
        kind,
        title: node.child(EL_TITLE).map(|t| t.text().trim().to_string()),
        label: node.child(EL_LABEL).map(|t| t.text().trim().to_string()),
        action,
        resource_types: resources_of(node, EL_RESOURCE_TYPE),
        usages: resources_of(node, EL_USAGE),
        hint_width: node.child(EL_HINT_WIDTH).and_then(|h| parse_hint(&h.text())),
        hint_height: node.child(EL_HINT_HEIGHT).and_then(|h| parse_hint(&h.text())),
    }
}

fn resources_of(node: &Element, property: &str) -> Vec<String> {
    node.children_named(property)
        .filter_map(|e| e.resource())
        .map(str::to_string)
        .collect()
}

/// `"600px"` → 600. Non-numeric hints are dropped.
pub fn parse_hint(raw: &str) -> Option<u32> {
    raw.trim().trim_end_matches("px").trim().parse().ok()
}

/// Lists the service providers of a catalog document.
pub fn parse_catalog(doc: &Document) -> Vec<ProviderEntry> {
    let mut entries = Vec::new();
    for catalog in doc.find_all(EL_SERVICE_PROVIDER_CATALOG) {
        for sp in catalog.path(&[EL_SERVICE_PROVIDER_REF, EL_SERVICE_PROVIDER]) {
            let title = sp.child(EL_TITLE).map(|t| t.text()).unwrap_or_default();
            match sp.about() {
                Some(about) => entries.push(ProviderEntry {
                    about: about.to_string(),
                    title: title.trim().to_string(),
                }),
                None => tracing::warn!("⚠️ Catalog entry '{}' has no rdf:about, skipped", title.trim()),
            }
        }
    }
    entries
}
