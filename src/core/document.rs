//! Read-only element tree for RDF/XML responses.
//!
//! Providers disagree on whether they prefix OSLC elements (`oslc:Service`
//! vs `Service`), so every lookup here matches on the local name only.

use crate::domain::vocab::{ATTR_ABOUT, ATTR_RESOURCE, RDF_NS};
use crate::utils::error::{OslcError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub namespace: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub prefix: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let prefix = tag
            .namespace()
            .and_then(|ns| node.lookup_prefix(ns))
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let attributes = node
            .attributes()
            .map(|a| Attribute {
                name: a.name().to_string(),
                namespace: a.namespace().map(str::to_string),
                value: a.value().to_string(),
            })
            .collect();

        let mut children = Vec::new();
        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Element::from_node(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        Self {
            name: tag.name().to_string(),
            prefix,
            attributes,
            children,
            text,
        }
    }

    /// `prefix:local` when the element was serialized with a prefix.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    pub fn is(&self, local_name: &str) -> bool {
        self.name == local_name
    }

    pub fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.is(local_name))
    }

    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(local_name))
    }

    /// Follows a chain of direct children, e.g. `["service", "Service"]`.
    pub fn path<'a>(&'a self, steps: &[&str]) -> Vec<&'a Element> {
        let mut current = vec![self];
        for step in steps {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(|c| c.is(step)))
                .collect();
        }
        current
    }

    /// All descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn descendants_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |e| e.is(local_name))
    }

    /// First descendant with the given local name.
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.is(local_name))
    }

    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == local_name)
            .map(|a| a.value.as_str())
    }

    pub fn attr_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == local_name && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    /// RDF-namespaced attribute, else any attribute with that local name.
    fn rdf_attr(&self, local_name: &str) -> Option<&str> {
        self.attr_ns(RDF_NS, local_name)
            .or_else(|| self.attr(local_name))
    }

    /// `rdf:resource`
    pub fn resource(&self) -> Option<&str> {
        self.rdf_attr(ATTR_RESOURCE)
    }

    /// `rdf:about`
    pub fn about(&self) -> Option<&str> {
        self.rdf_attr(ATTR_ABOUT)
    }

    /// Text content of this element and all descendants.
    pub fn text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text());
        }
        out
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| OslcError::Document {
            message: format!("XML parsing error: {}", e),
        })?;
        Ok(Self {
            root: Element::from_node(doc.root_element()),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Like `Element::find`, but the root itself is also a candidate.
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        if self.root.is(local_name) {
            return Some(&self.root);
        }
        self.root.find(local_name)
    }

    pub fn find_all<'a>(&'a self, local_name: &'a str) -> Vec<&'a Element> {
        let mut found: Vec<&Element> = Vec::new();
        if self.root.is(local_name) {
            found.push(&self.root);
        }
        found.extend(self.root.descendants_named(local_name));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:oslc="http://open-services.net/ns/core#"
         xmlns:dcterms="http://purl.org/dc/terms/">
  <oslc:ServiceProvider rdf:about="https://example.com/sp/1">
    <dcterms:title>Project <b>One</b></dcterms:title>
    <oslc:service>
      <Service xmlns="http://open-services.net/ns/core#">
        <domain rdf:resource="http://open-services.net/ns/cm#"/>
      </Service>
    </oslc:service>
  </oslc:ServiceProvider>
</rdf:RDF>"#;

    #[test]
    fn test_matches_prefixed_and_unprefixed_elements() {
        let doc = Document::parse(SAMPLE).unwrap();
        let provider = doc.find("ServiceProvider").unwrap();
        assert_eq!(provider.qualified_name(), "oslc:ServiceProvider");
        assert_eq!(provider.about(), Some("https://example.com/sp/1"));

        let services = provider.path(&["service", "Service"]);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].prefix, None);
        assert_eq!(
            services[0].child("domain").and_then(|d| d.resource()),
            Some("http://open-services.net/ns/cm#")
        );
    }

    #[test]
    fn test_text_includes_descendants() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.find("title").unwrap().text(), "Project One");
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let doc = Document::parse("<a><b><c/></b><d/></a>").unwrap();
        let names: Vec<&str> = doc.root().descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert_eq!(doc.find("a").map(|e| e.name.as_str()), Some("a"));
    }

    #[test]
    fn test_rdf_attribute_wins_over_foreign_namespace() {
        let doc = Document::parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                        xmlns:x="http://example.com/x#">
                 <link x:resource="https://example.com/wrong" rdf:resource="https://example.com/right"/>
                 <plain resource="https://example.com/plain"/>
               </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(
            doc.find("link").and_then(|e| e.resource()),
            Some("https://example.com/right")
        );
        assert_eq!(
            doc.find("link").and_then(|e| e.attr_ns("http://example.com/x#", "resource")),
            Some("https://example.com/wrong")
        );
        assert_eq!(
            doc.find("plain").and_then(|e| e.resource()),
            Some("https://example.com/plain")
        );
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        let err = Document::parse("<rdf:RDF><unclosed></rdf:RDF>").unwrap_err();
        assert!(matches!(err, OslcError::Document { .. }));
    }
}
