mod books;
mod config;
mod error;
mod health;
mod http;
mod model;
mod normalizer;
mod notify;
mod registry;
mod resolver;
mod server;
mod validator;
mod verse_scraper;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use health::HealthMonitor;
use notify::WebhookNotifier;
use registry::registry;
use resolver::Resolver;
use scripture_common::upstream::UpstreamClient;
use server::BibleResolverServer;
use verse_scraper::VerseScraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting bible-resolver");

    let config = Config::from_env()?;
    info!(
        base_url = %config.upstream.base_url,
        timeout_ms = config.upstream.request_timeout.as_millis() as u64,
        health_samples = config.health_samples.len(),
        webhook = config.health_webhook_url.is_some(),
        "configuration loaded"
    );

    let registry = registry();
    info!(books = registry.all_books().len(), "book registry loaded");
    if !registry.conflicts().is_empty() {
        warn!(
            conflicts = ?registry.conflicts(),
            "book registry has aliases claimed by more than one book; first claim wins"
        );
    }

    let client = UpstreamClient::new(config.upstream.clone())?;
    let resolver = Resolver::new(registry, VerseScraper::new(client.clone()));

    let notifier = config
        .health_webhook_url
        .clone()
        .map(|url| WebhookNotifier::new(client, url));
    let monitor = Arc::new(
        HealthMonitor::new(
            resolver.clone(),
            config.health_samples.clone(),
            config.health_delay,
        )
        .with_notifier(notifier),
    );

    if let Some(addr) = config.http_listen_addr {
        let state = http::HttpState::new(resolver.clone(), Arc::clone(&monitor));
        tokio::spawn(async move {
            if let Err(e) = http::serve(addr, state).await {
                tracing::error!(error = %e, "REST API stopped");
            }
        });
    }

    let server = BibleResolverServer::new(resolver, monitor);

    if let Some(addr) = config.mcp_tcp_listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
