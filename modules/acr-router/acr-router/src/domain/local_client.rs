//! Local (in-process) client for the ACR router.

use std::sync::Arc;

use acr_router_sdk::{AcrRouterClient, AcrRouterError, AuthnRequest, AuthnState, RouteOutcome};
use async_trait::async_trait;

use super::{DomainError, SelectionError, Service};

/// Local client wrapping the service.
///
/// Returned by [`AcrRouterModule::init`](crate::AcrRouterModule::init).
pub struct AcrRouterLocalClient {
    svc: Arc<Service>,
}

impl AcrRouterLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AcrRouterError {
    if let DomainError::Selection(SelectionError::NoAcceptableContext { .. }) = &e {
        // Peer asked for something we don't offer; not a fault on our side.
        tracing::warn!(operation = op, error = %e, "acr_router found no acceptable context");
    } else {
        tracing::error!(operation = op, error = ?e, "acr_router call failed");
    }
    e.into()
}

#[async_trait]
impl AcrRouterClient for AcrRouterLocalClient {
    async fn route(
        &self,
        request: &AuthnRequest,
        state: &AuthnState,
    ) -> Result<RouteOutcome, AcrRouterError> {
        self.svc
            .route(request, state)
            .await
            .map_err(|e| log_and_convert("route", e))
    }
}
