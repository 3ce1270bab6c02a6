#![allow(dead_code)]

pub const CM: &str = "http://open-services.net/ns/cm#";
pub const RM: &str = "http://open-services.net/ns/rm#";
pub const CHANGE_REQUEST: &str = "http://open-services.net/ns/cm#ChangeRequest";
pub const DEFECT: &str = "http://example.com/ns#Defect";

/// 測試用的服務提供者描述，所有 action URI 都指向 mock server
pub fn provider_xml(base: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:oslc="http://open-services.net/ns/core#"
         xmlns:dcterms="http://purl.org/dc/terms/">
  <oslc:ServiceProvider rdf:about="{base}/sp/1">
    <dcterms:title>JKE Banking</dcterms:title>
    <oslc:service>
      <oslc:Service>
        <oslc:domain rdf:resource="{CM}"/>
        <oslc:queryCapability>
          <oslc:QueryCapability>
            <dcterms:title>All work items</dcterms:title>
            <oslc:queryBase rdf:resource="{base}/query/all"/>
          </oslc:QueryCapability>
        </oslc:queryCapability>
        <oslc:queryCapability>
          <oslc:QueryCapability>
            <dcterms:title>Change requests</dcterms:title>
            <oslc:queryBase rdf:resource="{base}/query/cr"/>
            <oslc:resourceType rdf:resource="{CHANGE_REQUEST}"/>
          </oslc:QueryCapability>
        </oslc:queryCapability>
        <oslc:creationFactory>
          <oslc:CreationFactory>
            <oslc:creation rdf:resource="{base}/create/default"/>
            <oslc:resourceType rdf:resource="{CHANGE_REQUEST}"/>
            <oslc:usage rdf:resource="http://open-services.net/ns/core#default"/>
          </oslc:CreationFactory>
        </oslc:creationFactory>
        <oslc:creationFactory>
          <oslc:CreationFactory>
            <oslc:creation rdf:resource="{base}/create/defect"/>
            <oslc:resourceType rdf:resource="{DEFECT}"/>
            <oslc:usage rdf:resource="http://example.com/ns#planItem"/>
          </oslc:CreationFactory>
        </oslc:creationFactory>
        <oslc:selectionDialog>
          <oslc:Dialog>
            <dcterms:title>Select work item</dcterms:title>
            <oslc:dialog rdf:resource="{base}/dialog/select"/>
            <oslc:resourceType rdf:resource="{CHANGE_REQUEST}"/>
            <oslc:hintWidth>600px</oslc:hintWidth>
            <oslc:hintHeight>400px</oslc:hintHeight>
          </oslc:Dialog>
        </oslc:selectionDialog>
        <oslc:creationDialog>
          <oslc:Dialog>
            <oslc:dialog rdf:resource="{base}/dialog/create"/>
            <oslc:resourceType rdf:resource="{CHANGE_REQUEST}"/>
          </oslc:Dialog>
        </oslc:creationDialog>
      </oslc:Service>
    </oslc:service>
    <oslc:service>
      <oslc:Service>
        <oslc:domain rdf:resource="{RM}"/>
        <oslc:queryCapability>
          <oslc:QueryCapability>
            <oslc:queryBase rdf:resource="{base}/query/requirements"/>
            <oslc:resourceType rdf:resource="http://open-services.net/ns/rm#Requirement"/>
          </oslc:QueryCapability>
        </oslc:queryCapability>
      </oslc:Service>
    </oslc:service>
  </oslc:ServiceProvider>
</rdf:RDF>"#
    )
}

pub fn catalog_xml(base: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:oslc="http://open-services.net/ns/core#"
         xmlns:dcterms="http://purl.org/dc/terms/">
  <oslc:ServiceProviderCatalog rdf:about="{base}/catalog">
    <oslc:serviceProvider>
      <oslc:ServiceProvider rdf:about="{base}/sp/0">
        <dcterms:title>Sandbox</dcterms:title>
      </oslc:ServiceProvider>
    </oslc:serviceProvider>
    <oslc:serviceProvider>
      <oslc:ServiceProvider rdf:about="{base}/sp/1">
        <dcterms:title>JKE Banking</dcterms:title>
      </oslc:ServiceProvider>
    </oslc:serviceProvider>
  </oslc:ServiceProviderCatalog>
</rdf:RDF>"#
    )
}

/// 查詢結果頁；`next` 為 None 時代表最後一頁
pub fn result_page(about: &str, members: &[&str], next: Option<&str>) -> String {
    let members: String = members
        .iter()
        .map(|m| format!("    <rdfs:member rdf:resource=\"{m}\"/>\n"))
        .collect();
    let next = next
        .map(|n| format!("    <oslc:nextPage rdf:resource=\"{}\"/>\n", n.replace('&', "&amp;")))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:oslc="http://open-services.net/ns/core#">
  <rdf:Description rdf:about="{about}">
{members}  </rdf:Description>
  <oslc:ResponseInfo rdf:about="{about}">
{next}  </oslc:ResponseInfo>
</rdf:RDF>"#,
        about = about.replace('&', "&amp;")
    )
}
