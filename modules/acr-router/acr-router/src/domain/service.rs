//! Domain service for the ACR router.

use std::sync::Arc;

use acr_router_sdk::{AuthnRequest, AuthnState, RouteOutcome, SourceRegistry, StatePatch};
use tracing::debug;

use super::error::DomainError;
use super::selector::{RequestedContextSelector, SelectionResult, SourceSelector};
use super::table::ContextTable;

/// ACR router service.
///
/// Owns the validated table; selection is read-only and needs no locking.
pub struct Service {
    table: ContextTable,
    selector: Arc<dyn SourceSelector>,
    sources: Arc<SourceRegistry>,
}

impl Service {
    #[must_use]
    pub fn new(table: ContextTable, sources: Arc<SourceRegistry>) -> Self {
        Self::with_selector(table, sources, Arc::new(RequestedContextSelector))
    }

    #[must_use]
    pub fn with_selector(
        table: ContextTable,
        sources: Arc<SourceRegistry>,
        selector: Arc<dyn SourceSelector>,
    ) -> Self {
        Self {
            table,
            selector,
            sources,
        }
    }

    #[must_use]
    pub fn table(&self) -> &ContextTable {
        &self.table
    }

    /// Run selection for the requested context stored in `state`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequestState` if the stored requested context is malformed
    /// - `Selection` for any selection failure
    pub fn select(&self, state: &AuthnState) -> Result<SelectionResult, DomainError> {
        let requested = state.requested_authn_context()?.unwrap_or_default();
        let selection = self.selector.select(&self.table, &requested)?;

        debug!(
            source = %selection.source,
            class_ref = selection.class_ref.as_deref(),
            comparison = requested.comparison.as_deref(),
            requested = requested.class_refs().len(),
            "Selected authentication source"
        );

        Ok(selection)
    }

    /// Select a source and authenticate through it.
    ///
    /// The selected source sees `state` with the returned patch applied.
    ///
    /// # Errors
    ///
    /// - selection errors, see [`Service::select`]
    /// - `SourceUnavailable` if the selected source is not registered
    /// - errors returned by the source
    #[tracing::instrument(skip_all, fields(requester = request.requester.as_deref()))]
    pub async fn route(
        &self,
        request: &AuthnRequest,
        state: &AuthnState,
    ) -> Result<RouteOutcome, DomainError> {
        let SelectionResult { source, class_ref } = self.select(state)?;

        let client = self
            .sources
            .get(&source)
            .ok_or_else(|| DomainError::SourceUnavailable {
                source_name: source.clone(),
            })?;

        let patch = StatePatch { class_ref };
        let mut delegated = state.clone();
        patch.apply(&mut delegated);

        let response = client.authenticate(request, &delegated).await?;

        Ok(RouteOutcome {
            source,
            patch,
            response,
        })
    }
}
