//! ACR router module.

use std::sync::{Arc, OnceLock};

use acr_router_sdk::{AcrRouterClient, SourceRegistry};
use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AcrRouterConfig;
use crate::domain::{AcrRouterLocalClient, ConfigError, ContextTable, Service};

/// ACR router module.
///
/// This module:
/// 1. Reads and validates the context table from its configuration
/// 2. Creates the routing service over the shared [`SourceRegistry`]
/// 3. Hands out the `AcrRouterClient` consumed by protocol front-ends
///
/// Configuration errors fail `init`; a router is never built on a broken table.
#[derive(Default)]
pub struct AcrRouterModule {
    service: OnceLock<Arc<Service>>,
}

impl AcrRouterModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the module from its raw configuration tree.
    ///
    /// # Errors
    ///
    /// - a [`ConfigError`] (reachable through `downcast_ref`) if the
    ///   configuration is malformed or incomplete
    /// - if the module was already initialized
    #[tracing::instrument(skip_all, fields(default_source))]
    pub fn init(
        &self,
        config: &serde_json::Value,
        sources: Arc<SourceRegistry>,
    ) -> anyhow::Result<Arc<dyn AcrRouterClient>> {
        let cfg = AcrRouterConfig::deserialize(config)
            .map_err(ConfigError::from)
            .context("failed to parse acr_router configuration")?;
        let table =
            ContextTable::from_config(&cfg).context("invalid acr_router context table")?;

        tracing::Span::current().record("default_source", table.default_source());
        info!(
            contexts = table.len(),
            default_source = %table.default_source(),
            "Initializing acr_router"
        );

        for source in table.sources() {
            if !sources.contains(source) {
                warn!(source, "Configured authentication source is not registered yet");
            }
        }

        let svc = Arc::new(Service::new(table, sources));
        let api: Arc<dyn AcrRouterClient> = Arc::new(AcrRouterLocalClient::new(svc.clone()));

        self.service
            .set(svc)
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        Ok(api)
    }

    /// The service, once initialized.
    #[must_use]
    pub fn service(&self) -> Option<&Arc<Service>> {
        self.service.get()
    }
}
