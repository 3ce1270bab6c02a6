//! Provider-hosted creation/selection dialogs.
//!
//! A dialog page reports back through window messages of the form
//! `oslc-response:{"oslc:results": [...]}`. The host application feeds those
//! messages into a [`MessageBus`], which routes them to the one listener
//! registered for the sending page.

use crate::core::client::OslcClient;
use crate::domain::model::{Capability, DialogOutcome, EmbeddedPage, PageId};
use crate::domain::ports::{Presenter, Transport};
use crate::domain::vocab::*;
use crate::utils::error::{OslcError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Message(String),
    /// The user closed the presentation through its own chrome.
    Closed,
}

#[derive(Default)]
struct BusInner {
    listeners: Mutex<HashMap<PageId, mpsc::UnboundedSender<PageEvent>>>,
    next_page: AtomicU64,
}

/// Dispatch table from embedded-page identity to its listener.
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Arc<BusInner>,
}

static GLOBAL_BUS: OnceLock<MessageBus> = OnceLock::new();

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bus clients use unless given their own.
    pub fn global() -> &'static MessageBus {
        GLOBAL_BUS.get_or_init(MessageBus::new)
    }

    fn listeners(&self) -> MutexGuard<'_, HashMap<PageId, mpsc::UnboundedSender<PageEvent>>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn allocate_page_id(&self) -> PageId {
        PageId(self.inner.next_page.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Registers the listener for `page`, replacing any previous one.
    pub fn register(&self, page: PageId) -> ListenerRegistration {
        let (sender, receiver) = mpsc::unbounded_channel();
        if self.listeners().insert(page, sender).is_some() {
            tracing::warn!("⚠️ Replaced existing listener for {}", page);
        }
        tracing::debug!("👂 Listening for messages from {}", page);
        ListenerRegistration {
            bus: self.clone(),
            page,
            receiver,
        }
    }

    fn deliver(&self, page: PageId, event: PageEvent) -> bool {
        match self.listeners().get(&page) {
            Some(sender) => sender.send(event).is_ok(),
            None => {
                tracing::trace!("No listener for {}, event dropped", page);
                false
            }
        }
    }

    /// Routes a window message from `source`. Returns whether a listener took it.
    pub fn post(&self, source: PageId, payload: impl Into<String>) -> bool {
        self.deliver(source, PageEvent::Message(payload.into()))
    }

    /// Reports that the presentation of `source` was dismissed by the user.
    pub fn close(&self, source: PageId) -> bool {
        self.deliver(source, PageEvent::Closed)
    }

    pub fn is_registered(&self, page: PageId) -> bool {
        self.listeners().contains_key(&page)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    fn deregister(&self, page: PageId) {
        if self.listeners().remove(&page).is_some() {
            tracing::debug!("👂 Stopped listening for {}", page);
        }
    }
}

/// Scoped listener; deregisters itself when dropped.
pub struct ListenerRegistration {
    bus: MessageBus,
    page: PageId,
    receiver: mpsc::UnboundedReceiver<PageEvent>,
}

impl ListenerRegistration {
    pub fn page(&self) -> PageId {
        self.page
    }

    pub async fn recv(&mut self) -> Option<PageEvent> {
        self.receiver.recv().await
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.bus.deregister(self.page);
    }
}

#[derive(Debug, Deserialize)]
struct ResultEnvelope {
    #[serde(rename = "oslc:results", alias = "results", default)]
    results: Vec<serde_json::Value>,
}

/// Reads the part of a completion message after the `oslc-response:` header.
/// Unreadable envelopes count as "nothing selected".
pub fn parse_envelope(message: &str) -> DialogOutcome {
    let Some(start) = message.find('{') else {
        tracing::warn!("⚠️ Dialog response without a JSON object ignored");
        return DialogOutcome::NothingSelected;
    };

    match serde_json::from_str::<ResultEnvelope>(&message[start..]) {
        Ok(envelope) if !envelope.results.is_empty() => DialogOutcome::Completed(envelope.results),
        Ok(_) => DialogOutcome::NothingSelected,
        Err(e) => {
            tracing::warn!("⚠️ Malformed dialog response ignored: {}", e);
            DialogOutcome::NothingSelected
        }
    }
}

/// Render URL with the postMessage protocol marker as its fragment.
/// A fragment already present on `url` is dropped.
pub fn with_protocol_fragment(url: &str) -> String {
    let base = url.split('#').next().unwrap_or(url);
    format!("{}{}", base, DIALOG_PROTOCOL_FRAGMENT)
}

/// One presented dialog page and its completion listener.
pub struct DialogSession<'p, P: Presenter + ?Sized> {
    page: EmbeddedPage,
    registration: Option<ListenerRegistration>,
    presenter: &'p P,
}

impl<'p, P: Presenter + ?Sized> DialogSession<'p, P> {
    /// Registers the listener, then presents the page, so no early message is lost.
    pub async fn open(
        bus: &MessageBus,
        presenter: &'p P,
        render_url: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self> {
        let id = bus.allocate_page_id();
        let registration = bus.register(id);
        let page = EmbeddedPage {
            id,
            url: with_protocol_fragment(render_url),
            width,
            height,
            title: DIALOG_TITLE.to_string(),
        };

        tracing::info!("🪟 Presenting dialog {} at {}", id, page.url);
        presenter.present(&page).await?;

        Ok(Self {
            page,
            registration: Some(registration),
            presenter,
        })
    }

    pub fn page(&self) -> &EmbeddedPage {
        &self.page
    }

    /// Waits for the page's `oslc-response:` message or for a dismissal.
    pub async fn wait(mut self) -> Result<DialogOutcome> {
        loop {
            let event = match self.registration.as_mut() {
                Some(registration) => registration.recv().await,
                None => None,
            };

            match event {
                Some(PageEvent::Message(payload)) => {
                    let Some(body) = payload.strip_prefix(DIALOG_RESPONSE_HEADER) else {
                        tracing::trace!("Ignoring unrelated message from {}", self.page.id);
                        continue;
                    };

                    self.registration.take();
                    if let Err(e) = self.presenter.dismiss(&self.page.id).await {
                        tracing::warn!("⚠️ Could not dismiss dialog {}: {}", self.page.id, e);
                    }

                    let outcome = parse_envelope(body);
                    match &outcome {
                        DialogOutcome::Completed(results) => tracing::info!(
                            "✅ Dialog {} returned {} resources",
                            self.page.id,
                            results.len()
                        ),
                        _ => tracing::info!("Dialog {} returned nothing", self.page.id),
                    }
                    return Ok(outcome);
                }
                Some(PageEvent::Closed) | None => {
                    self.registration.take();
                    tracing::info!("🚪 Dialog {} dismissed without a response", self.page.id);
                    return Ok(DialogOutcome::Cancelled);
                }
            }
        }
    }
}

impl<T: Transport> OslcClient<T> {
    pub async fn open_selection_dialog<P: Presenter + ?Sized>(
        &self,
        presenter: &P,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
    ) -> Result<DialogOutcome> {
        let Some(dialog) = self
            .lookup_selection_dialog(service_provider_url, domain, resource_type)
            .await?
        else {
            return Ok(DialogOutcome::NotAdvertised);
        };
        self.run_dialog(presenter, &dialog, None).await
    }

    /// With a `draft`, the draft is first POSTed to the dialog URI and the
    /// provider's `Location` is presented instead, pre-filled from the draft.
    pub async fn open_creation_dialog<P: Presenter + ?Sized>(
        &self,
        presenter: &P,
        service_provider_url: &str,
        domain: &str,
        resource_type: Option<&str>,
        draft: Option<&str>,
    ) -> Result<DialogOutcome> {
        let Some(dialog) = self
            .lookup_creation_dialog(service_provider_url, domain, resource_type)
            .await?
        else {
            return Ok(DialogOutcome::NotAdvertised);
        };
        self.run_dialog(presenter, &dialog, draft).await
    }

    pub async fn run_dialog<P: Presenter + ?Sized>(
        &self,
        presenter: &P,
        dialog: &Capability,
        draft: Option<&str>,
    ) -> Result<DialogOutcome> {
        let target = match draft {
            Some(draft) => self.post_draft(&dialog.action, draft).await?,
            None => dialog.action.clone(),
        };

        let session = DialogSession::open(
            self.message_bus(),
            presenter,
            &target,
            dialog.hint_width,
            dialog.hint_height,
        )
        .await?;
        session.wait().await
    }

    async fn post_draft(&self, dialog_url: &str, draft: &str) -> Result<String> {
        let response = self
            .create_resource(dialog_url, draft, Some(MEDIA_RDF_XML), Some(MEDIA_ANY))
            .await?;
        let location = response.location().ok_or_else(|| OslcError::Protocol {
            message: format!("draft POST to {} returned no Location header", dialog_url),
        })?;

        // Location may be relative to the dialog URI.
        let resolved = url::Url::parse(dialog_url)
            .and_then(|base| base.join(location))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| location.to_string());
        tracing::debug!("📝 Draft stored at {}", resolved);
        Ok(resolved)
    }
}
