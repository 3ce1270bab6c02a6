use crate::config::toml_config::{AuthConfig, TomlConfig};
use crate::domain::model::CapabilityKind;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "oslc")]
#[command(about = "Discover OSLC capabilities, run queries and manage resources")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Override client.oslc_version
    #[arg(long)]
    pub oslc_version: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Service provider URL; otherwise taken from the config or looked up by title
    #[arg(long)]
    pub service_provider: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Find a service provider in a catalog by title
    Provider {
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Resolve the best capability of a kind for a domain
    Capability {
        #[arg(long, value_enum)]
        kind: CapabilityKind,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        resource_type: Option<String>,
        #[arg(long)]
        usage: Option<String>,
    },
    /// Run a query and follow oslc:nextPage links
    Query {
        /// Query base URI; resolved from the provider when omitted
        #[arg(long)]
        query_base: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        resource_type: Option<String>,
        #[arg(long = "where")]
        where_clause: Option<String>,
        #[arg(long)]
        select: Option<String>,
        #[arg(long)]
        order_by: Option<String>,
        #[arg(long)]
        search_terms: Option<String>,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// GET a resource and print its body
    Get {
        url: String,
        #[arg(long)]
        accept: Option<String>,
        #[arg(long)]
        no_version_header: bool,
    },
    /// DELETE a resource
    Delete { url: String },
}

impl CliConfig {
    /// 將命令列參數覆蓋到檔案配置上
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(version) = &self.oslc_version {
            config.client.oslc_version = Some(version.clone());
        }
        if let Some(username) = &self.username {
            let password = self
                .password
                .clone()
                .or_else(|| config.auth.as_ref().map(|a| a.password.clone()))
                .unwrap_or_default();
            config.auth = Some(AuthConfig {
                username: username.clone(),
                password,
            });
        }
        if let Some(url) = &self.service_provider {
            config.provider.service_provider_url = Some(url.clone());
        }

        match &self.command {
            Command::Provider { catalog, title } => {
                if catalog.is_some() {
                    config.provider.catalog_url = catalog.clone();
                }
                if title.is_some() {
                    config.provider.service_provider_title = title.clone();
                }
            }
            Command::Capability {
                domain,
                resource_type,
                ..
            } => {
                if domain.is_some() {
                    config.provider.domain = domain.clone();
                }
                if resource_type.is_some() {
                    config.provider.resource_type = resource_type.clone();
                }
            }
            Command::Query {
                domain,
                resource_type,
                page_size,
                max_pages,
                ..
            } => {
                if domain.is_some() {
                    config.provider.domain = domain.clone();
                }
                if resource_type.is_some() {
                    config.provider.resource_type = resource_type.clone();
                }
                if page_size.is_some() {
                    config.query.page_size = *page_size;
                }
                if max_pages.is_some() {
                    config.query.max_pages = *max_pages;
                }
            }
            Command::Get { .. } | Command::Delete { .. } => {}
        }
    }
}
