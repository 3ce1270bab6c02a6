use clap::Parser;
use oslc_client::core::query::members;
use oslc_client::utils::error::{ErrorSeverity, OslcError};
use oslc_client::utils::{logger, validation::Validate};
use oslc_client::{
    CapabilityRequest, CliConfig, Command, OslcClient, QuerySpec, ReqwestTransport, Result,
    TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting oslc CLI");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli.command);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn load_config(cli: &CliConfig) -> Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📋 Loading configuration from {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    config.validate()?;
    Ok(config)
}

async fn service_provider_url(
    client: &OslcClient<ReqwestTransport>,
    config: &TomlConfig,
) -> Result<String> {
    if let Some(url) = &config.provider.service_provider_url {
        return Ok(url.clone());
    }

    let catalog = config
        .provider
        .catalog_url
        .as_deref()
        .ok_or_else(|| OslcError::MissingConfigError {
            field: "provider.service_provider_url".to_string(),
        })?;
    let title = config
        .provider
        .service_provider_title
        .as_deref()
        .ok_or_else(|| OslcError::MissingConfigError {
            field: "provider.service_provider_title".to_string(),
        })?;

    client
        .lookup_service_provider_url(catalog, title)
        .await?
        .ok_or_else(|| OslcError::Protocol {
            message: format!("no service provider titled '{}' in {}", title, catalog),
        })
}

fn required_domain(config: &TomlConfig) -> Result<&str> {
    config
        .provider
        .domain
        .as_deref()
        .ok_or_else(|| OslcError::MissingConfigError {
            field: "provider.domain".to_string(),
        })
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = load_config(cli)?;
    let transport = ReqwestTransport::from_config(&config)?;
    let client = OslcClient::from_config(transport, &config);

    match &cli.command {
        Command::Provider { .. } => {
            let url = service_provider_url(&client, &config).await?;
            println!("{}", url);
        }
        Command::Capability { kind, usage, .. } => {
            let provider_url = service_provider_url(&client, &config).await?;
            let domain = required_domain(&config)?;
            let request = CapabilityRequest::new(*kind, domain)
                .resource_type(config.provider.resource_type.as_deref())
                .usage(usage.as_deref());

            match client.lookup_capability(&provider_url, &request).await? {
                Some(capability) => {
                    tracing::info!("✅ Resolved {}: {}", kind, capability.action);
                    println!("{}", serde_json::to_string_pretty(&capability)?);
                    if kind.is_dialog() {
                        if let (Some(w), Some(h)) = (capability.hint_width, capability.hint_height) {
                            println!("📐 Dialog size hint: {}x{}", w, h);
                        }
                    }
                }
                None => println!("⚠️ No {} advertised for {}", kind, domain),
            }
        }
        Command::Query {
            query_base,
            where_clause,
            select,
            order_by,
            search_terms,
            prefix,
            ..
        } => {
            let base = match query_base {
                Some(base) => base.clone(),
                None => {
                    let provider_url = service_provider_url(&client, &config).await?;
                    let domain = required_domain(&config)?;
                    client
                        .lookup_query_capability_uri(
                            &provider_url,
                            domain,
                            config.provider.resource_type.as_deref(),
                        )
                        .await?
                        .ok_or_else(|| OslcError::Protocol {
                            message: format!("no query capability advertised for {}", domain),
                        })?
                }
            };

            let mut spec = QuerySpec::new(base).page_size(config.page_size());
            if let Some(w) = where_clause {
                spec = spec.where_clause(w.as_str());
            }
            if let Some(s) = select {
                spec = spec.select(s.as_str());
            }
            if let Some(o) = order_by {
                spec = spec.order_by(o.as_str());
            }
            if let Some(t) = search_terms {
                spec = spec.search_terms(t.as_str());
            }
            if let Some(p) = prefix {
                spec = spec.prefix(p.as_str());
            }

            let mut query = client.query(spec);
            let max_pages = config.max_pages();
            let mut pages = 0usize;
            let mut total = 0usize;
            while max_pages.map_or(true, |max| pages < max) {
                let Some(page) = query.next_page().await? else {
                    break;
                };
                pages += 1;
                for member in members(&page) {
                    total += 1;
                    println!("{}", member);
                }
            }
            tracing::info!("✅ Query finished: {} members over {} page(s)", total, pages);
        }
        Command::Get {
            url,
            accept,
            no_version_header,
        } => {
            let response = client
                .get_resource(url, accept.as_deref(), !no_version_header)
                .await?;
            if let Some(etag) = response.etag() {
                tracing::info!("🏷️ ETag: {}", etag);
            }
            println!("{}", response.body);
        }
        Command::Delete { url } => {
            client.delete_resource(url).await?;
            println!("✅ Deleted {}", url);
        }
    }

    Ok(())
}
