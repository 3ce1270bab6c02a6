use crate::core::client::OslcClient;
use crate::core::document::Document;
use crate::domain::ports::Transport;
use crate::domain::vocab::*;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::Serializer;

/// Declarative query parameters. Empty clauses are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub capability_uri: String,
    /// 0 = no paging parameters
    pub page_size: u32,
    pub select: Option<String>,
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub search_terms: Option<String>,
    pub prefix: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl QuerySpec {
    pub fn new(capability_uri: impl Into<String>) -> Self {
        Self {
            capability_uri: capability_uri.into(),
            ..Self::default()
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn where_clause(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = Some(where_clause.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn search_terms(mut self, search_terms: impl Into<String>) -> Self {
        self.search_terms = Some(search_terms.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// `oslc.paging=true&oslc.pageSize=<n>`, or `None` when paging is off.
    pub fn pagination_params(&self) -> Option<String> {
        if self.page_size == 0 {
            return None;
        }
        let mut params = Serializer::new(String::new());
        params
            .append_pair(PARAM_PAGING, "true")
            .append_pair(PARAM_PAGE_SIZE, &self.page_size.to_string());
        Some(params.finish())
    }

    /// The `oslc.*` query terms in fixed order, or `None` when all are empty.
    pub fn query_params(&self) -> Option<String> {
        let terms = [
            (PARAM_WHERE, non_empty(&self.where_clause)),
            (PARAM_SELECT, non_empty(&self.select)),
            (PARAM_ORDER_BY, non_empty(&self.order_by)),
            (PARAM_SEARCH_TERMS, non_empty(&self.search_terms)),
            (PARAM_PREFIX, non_empty(&self.prefix)),
        ];

        let mut params = Serializer::new(String::new());
        let mut any = false;
        for (name, value) in terms {
            if let Some(value) = value {
                params.append_pair(name, value);
                any = true;
            }
        }
        any.then(|| params.finish())
    }

    /// `<capability>[?paging][(?|&)terms]`
    pub fn resource_url(&self) -> String {
        let mut url = self.capability_uri.clone();
        let pagination = self.pagination_params();
        let query = self.query_params();

        let query_joiner = if pagination.is_some() { '&' } else { '?' };
        if let Some(pagination) = pagination {
            url.push('?');
            url.push_str(&pagination);
        }
        if let Some(query) = query {
            url.push(query_joiner);
            url.push_str(&query);
        }
        url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Unexecuted,
    HasResults,
    /// The last page carried no `oslc:nextPage`.
    Exhausted,
}

/// Continuation link of a result page.
pub fn next_page_link(page: &Document) -> Option<String> {
    page.find(EL_NEXT_PAGE)
        .and_then(|e| e.resource())
        .filter(|link| !link.is_empty())
        .map(str::to_string)
}

/// URIs of the `rdfs:member` entries of a result page, either referenced or
/// described inline.
pub fn members(page: &Document) -> Vec<String> {
    page.find_all(EL_MEMBER)
        .into_iter()
        .filter_map(|m| {
            m.resource()
                .or_else(|| m.children.first().and_then(|c| c.about()))
                .map(str::to_string)
        })
        .collect()
}

/// Walks the result pages of one query. Advancing needs `&mut self`, so a
/// cursor cannot be advanced from two places at once.
pub struct OslcQuery<'c, T: Transport> {
    client: &'c OslcClient<T>,
    url: String,
    last_result: Option<Document>,
    state: CursorState,
}

impl<'c, T: Transport> OslcQuery<'c, T> {
    pub fn new(client: &'c OslcClient<T>, spec: QuerySpec) -> Self {
        let url = spec.resource_url();
        tracing::debug!("🔍 Query URL: {}", url);
        Self {
            client,
            url,
            last_result: None,
            state: CursorState::Unexecuted,
        }
    }

    pub fn query_url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn last_result(&self) -> Option<&Document> {
        self.last_result.as_ref()
    }

    pub fn has_next_page(&self) -> bool {
        match (&self.state, &self.last_result) {
            (CursorState::Unexecuted, _) => true,
            (CursorState::Exhausted, _) => false,
            (CursorState::HasResults, Some(page)) => next_page_link(page).is_some(),
            (CursorState::HasResults, None) => false,
        }
    }

    /// Fetches the current URL and remembers the page for `next_page`.
    pub async fn get_response(&mut self) -> Result<Document> {
        // Queries go out without OSLC-Core-Version.
        let response = self
            .client
            .get_resource(&self.url, Some(MEDIA_RDF_XML), false)
            .await?;
        let page = Document::parse(&response.body)?;

        self.last_result = Some(page.clone());
        self.state = CursorState::HasResults;
        tracing::info!("📄 Fetched query page {}", self.url);
        Ok(page)
    }

    /// Follows the previous page's `oslc:nextPage`. Before any execution this
    /// is the same as `get_response`. `Ok(None)` once no continuation remains.
    pub async fn next_page(&mut self) -> Result<Option<Document>> {
        let Some(last) = &self.last_result else {
            return self.get_response().await.map(Some);
        };

        match next_page_link(last) {
            Some(link) => {
                self.url = link;
                self.get_response().await.map(Some)
            }
            None => {
                tracing::debug!("🔍 No oslc:nextPage after {}, query exhausted", self.url);
                self.state = CursorState::Exhausted;
                Ok(None)
            }
        }
    }
}

impl<T: Transport> OslcClient<T> {
    pub fn query(&self, spec: QuerySpec) -> OslcQuery<'_, T> {
        OslcQuery::new(self, spec)
    }
}
