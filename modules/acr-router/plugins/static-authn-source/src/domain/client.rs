//! Client implementation for the static authentication source.
//!
//! Implements `AuthnSourceClient` using the domain service.

use acr_router_sdk::{
    AcrRouterError, AuthnRequest, AuthnSourceClient, AuthnState, SourceResponse,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use super::service::Service;

#[async_trait]
impl AuthnSourceClient for Service {
    async fn authenticate(
        &self,
        request: &AuthnRequest,
        state: &AuthnState,
    ) -> Result<SourceResponse, AcrRouterError> {
        let credential = request
            .credential
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .unwrap_or_default();

        self.authenticate(credential, state.class_ref())
            .map(SourceResponse::Authenticated)
    }
}
