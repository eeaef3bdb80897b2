//! Static authentication source module.

use std::sync::{Arc, OnceLock};

use acr_router_sdk::{AuthnSourceClient, SourceRegistry};
use serde::Deserialize;
use tracing::info;

use crate::config::StaticAuthnSourceConfig;
use crate::domain::Service;

/// Static authentication source module.
///
/// Loads its configuration, builds the service and registers it in the
/// [`SourceRegistry`] under `source_name`.
#[derive(Default)]
pub struct StaticAuthnSourcePlugin {
    service: OnceLock<Arc<Service>>,
}

impl StaticAuthnSourcePlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize from the raw configuration tree and register the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or the plugin
    /// was already initialized.
    pub fn init(&self, config: &serde_json::Value, registry: &SourceRegistry) -> anyhow::Result<()> {
        info!("Initializing static_authn_source");

        let cfg = StaticAuthnSourceConfig::deserialize(config)?;
        if cfg.accepts_any_credential() {
            tracing::warn!(
                source = %cfg.source_name,
                "Static authn source has no `credentials`: \
                 every non-empty credential is accepted with one hardcoded subject. \
                 Do NOT use this configuration in production."
            );
        }

        info!(
            source = %cfg.source_name,
            credential_count = cfg.credentials.len(),
            class_refs = ?cfg.class_refs,
            "Loaded source configuration"
        );

        let service = Arc::new(Service::from_config(&cfg));
        self.service
            .set(service.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        let api: Arc<dyn AuthnSourceClient> = service;
        if registry.register(cfg.source_name.clone(), api).is_some() {
            tracing::warn!(source = %cfg.source_name, "Replaced a previously registered source");
        }

        info!(source = %cfg.source_name, "Static authn source initialized");
        Ok(())
    }
}
