pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::TomlConfig;

pub use crate::adapters::http::ReqwestTransport;
pub use crate::core::client::OslcClient;
pub use crate::core::dialog::{DialogSession, MessageBus, PageEvent};
pub use crate::core::query::{CursorState, OslcQuery, QuerySpec};
pub use crate::core::resolver::CapabilityRequest;
pub use crate::domain::model::{Capability, CapabilityKind, DialogOutcome, EmbeddedPage, PageId};
pub use crate::domain::ports::{Presenter, Transport};
pub use crate::utils::error::{OslcError, Result};
