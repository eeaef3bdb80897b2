//! Registry of authentication sources.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::plugin_api::AuthnSourceClient;

/// Concurrent name-to-source map.
///
/// Sources register themselves under the name the router configuration
/// refers to. Lookups happen per request, so a source may register after
/// the router has been built.
#[derive(Default)]
pub struct SourceRegistry {
    sources: DashMap<String, Arc<dyn AuthnSourceClient>>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `client` under `name`, returning the client it replaced.
    pub fn register(
        &self,
        name: impl Into<String>,
        client: Arc<dyn AuthnSourceClient>,
    ) -> Option<Arc<dyn AuthnSourceClient>> {
        let name = name.into();
        tracing::debug!(source = %name, "Registering authentication source");
        self.sources.insert(name, client)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn AuthnSourceClient>> {
        self.sources.get(name).map(|entry| Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Registered source names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{AcrRouterError, AuthnRequest, AuthnState, SourceResponse};

    struct Redirecting(&'static str);

    #[async_trait]
    impl AuthnSourceClient for Redirecting {
        async fn authenticate(
            &self,
            _request: &AuthnRequest,
            _state: &AuthnState,
        ) -> Result<SourceResponse, AcrRouterError> {
            Ok(SourceResponse::Continue {
                location: self.0.to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn registered_source_is_returned() {
        let registry = SourceRegistry::new();
        assert!(registry.register("ldap", Arc::new(Redirecting("/ldap"))).is_none());

        let client = registry.get("ldap").unwrap();
        let response = client
            .authenticate(&AuthnRequest::new(), &AuthnState::new())
            .await
            .unwrap();
        assert_eq!(
            response,
            SourceResponse::Continue {
                location: "/ldap".to_owned()
            }
        );
    }

    #[test]
    fn unknown_source_is_none() {
        let registry = SourceRegistry::new();
        assert!(registry.get("missing").is_none());
        assert!(!registry.contains("missing"));
        assert!(registry.is_empty());
    }

    #[test]
    fn register_replaces_existing_source() {
        let registry = SourceRegistry::new();
        registry.register("mfa", Arc::new(Redirecting("/old")));
        let previous = registry.register("mfa", Arc::new(Redirecting("/new")));

        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let registry = SourceRegistry::new();
        registry.register("totp", Arc::new(Redirecting("/totp")));
        registry.register("ldap", Arc::new(Redirecting("/ldap")));

        assert_eq!(registry.names(), vec!["ldap".to_owned(), "totp".to_owned()]);
        assert_eq!(format!("{registry:?}"), r#"SourceRegistry { sources: ["ldap", "totp"] }"#);
    }
}
