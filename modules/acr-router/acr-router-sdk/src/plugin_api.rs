//! Source API trait for authentication backends.
//!
//! Sources implement this trait and register in a [`SourceRegistry`]
//! under the name the router configuration refers to.
//!
//! [`SourceRegistry`]: crate::SourceRegistry

use async_trait::async_trait;

use crate::error::AcrRouterError;
use crate::models::{AuthnRequest, SourceResponse};
use crate::state::AuthnState;

/// Source API trait for authentication backends.
///
/// The router calls this exactly once per successful selection. `state`
/// is the request state with the router's patch already applied, so the
/// honored class ref is available through [`AuthnState::class_ref`].
#[async_trait]
pub trait AuthnSourceClient: Send + Sync {
    /// Authenticate the request.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential is missing or rejected
    /// - `Internal` for unexpected errors
    async fn authenticate(
        &self,
        request: &AuthnRequest,
        state: &AuthnState,
    ) -> Result<SourceResponse, AcrRouterError>;
}
